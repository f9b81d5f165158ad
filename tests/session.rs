// End-to-end frame scenarios through the public session API

use wavegrid_engine::field;
use wavegrid_engine::{Cell, Emitter, FieldConfig, FieldSession, Mode};

const NOW: f64 = 1_700_000_000_000.0;

fn ripple_session(grid_size: u32, margin: u32) -> FieldSession {
    let config = FieldConfig { grid_size, margin, emitters: 0, mode: 4, blend_percent: 100.0, ..Default::default() };
    FieldSession::new(&config, 99, NOW).expect("failed to build session")
}

#[test]
fn emitter_expires_and_respawns_at_due() {
    let mut session = ripple_session(10, 0);
    let lead = session.tuning().ripple.lead_ms;
    session
        .emitters_mut()
        .spawn_at(Emitter::new(Cell::new(5, 5), 1000.0, NOW + 1000.0))
        .expect("failed to place emitter");

    let expiry = NOW + 1000.0;
    assert_eq!(session.emitters_mut().mark_expired(expiry, lead), 1);
    assert!(session.emitters().get(0).unwrap().complete);

    let stats = session.tick(1.0, expiry);
    assert_eq!(stats.respawned, 1);

    let e = session.emitters().get(0).unwrap();
    assert!(!e.complete);
    assert!(session.grid().in_spawn_region(e.location));
    assert_eq!(e.due, expiry + e.duration);
}

#[test]
fn ripple_frame_matches_field_function() {
    let mut session = ripple_session(10, 0);
    session
        .emitters_mut()
        .spawn_at(Emitter::new(Cell::new(5, 5), 1000.0, NOW + 1000.0))
        .expect("failed to place emitter");

    let now = NOW + 200.0;
    let stats = session.tick(0.75, now);
    assert_eq!(stats.respawned, 0);

    let tuning = session.tuning().ripple;
    let center = session.grid().index(Cell::new(5, 5));
    let expected = field::ripples(0.75, now, Cell::new(5, 5), session.emitters(), &tuning);
    assert_eq!(session.frame().height(center), expected);
    assert_ne!(expected, 0.0);

    // Well beyond the ripple radius
    let far = session.grid().index(Cell::new(0, 0));
    assert_eq!(session.frame().height(far), 0.0);
}

#[test]
fn mode_switch_keeps_pool() {
    let config = FieldConfig { grid_size: 12, margin: 2, emitters: 8, ..Default::default() };
    let mut session = FieldSession::new(&config, 5, NOW).expect("failed to build session");
    let before: Vec<Emitter> = session.emitters().iter().collect();

    session.set_mode(Mode::Pulse);
    session.set_mode(Mode::Ripples);
    assert_eq!(session.emitters().iter().collect::<Vec<_>>(), before);
}

#[test]
fn locations_stay_in_bounds_across_resizes() {
    let mut session = ripple_session(16, 3);
    let mut now = NOW;
    for count in [1, 12, 4, 30, 2] {
        session.set_emitter_count(count, now).expect("failed to resize");
        for _ in 0..40 {
            now += 120.0;
            session.tick(((now - NOW) / 1000.0) as f32, now);
            let grid = *session.grid();
            assert_eq!(session.emitters().len(), count);
            assert!(session.emitters().iter().all(|e| grid.in_spawn_region(e.location) && !e.complete));
        }
    }
}

#[test]
fn pool_edits_cannot_break_ripple_frames() {
    let mut session = ripple_session(10, 1);
    let pool = session.emitters_mut();
    assert!(pool.spawn_at(Emitter::new(Cell::new(4, 4), 0.0, NOW)).is_err());
    assert!(pool.spawn_at(Emitter::new(Cell::new(4, 4), -250.0, NOW)).is_err());
    pool.spawn_at(Emitter::new(Cell::new(4, 4), 1.0, NOW + 1.0)).expect("failed to place emitter");
    assert_eq!(session.emitters().len(), 1);

    let mut now = NOW;
    for frame in 0..200 {
        now += 16.0;
        session.tick(frame as f32 / 60.0, now);
        assert!(session.emitters().iter().all(|e| e.duration > 0.0));
        assert!(session.frame().heights().iter().all(|h| h.is_finite()));
    }
}
