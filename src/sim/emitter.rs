// emitter.rs - Ripple emitters (raindrops / bubbles)
//
// Structure-of-Arrays layout with a fixed capacity. Emitters never die: an
// expired emitter is respawned in place on the same tick, and the pool only
// shrinks when resized.

use fastrand::Rng;

use super::{MAX_EMITTERS, random_duration, random_location};
use crate::config::RippleTuning;
use crate::error::{FieldError, Result};
use crate::field::{Cell, GridConfig};

/// One emitter, copied out of the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emitter {
    pub location: Cell,
    /// Lifetime of the current activation (ms)
    pub duration: f64,
    /// Expiry timestamp (ms since epoch): spawn time + duration
    pub due: f64,
    pub complete: bool,
}

impl Emitter {
    pub fn new(location: Cell, duration: f64, due: f64) -> Self {
        Self { location, duration, due, complete: false }
    }

    /// Fresh activation at a random location inside the grid's spawn region.
    pub fn spawn(now: f64, grid: &GridConfig, ripple: &RippleTuning, rng: &mut Rng) -> Self {
        let duration = random_duration(ripple.min_duration_ms, ripple.max_duration_ms, rng);
        Self::new(random_location(grid, rng), duration, now + duration)
    }

    /// Fraction of the lifetime left; 1 at spawn, 0 at `due`
    pub fn remaining_fraction(&self, now: f64) -> f64 {
        (self.due - now) / self.duration
    }
}

pub struct EmitterPool {
    // Location
    pub(crate) x: [u32; MAX_EMITTERS],
    pub(crate) z: [u32; MAX_EMITTERS],

    // Lifetime
    pub(crate) duration: [f64; MAX_EMITTERS],
    pub(crate) due: [f64; MAX_EMITTERS],
    pub(crate) complete: [bool; MAX_EMITTERS],

    // Count
    n: usize,
}

impl Default for EmitterPool {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterPool {
    pub fn new() -> Self {
        Self {
            x: [0; MAX_EMITTERS],
            z: [0; MAX_EMITTERS],
            duration: [0.0; MAX_EMITTERS],
            due: [0.0; MAX_EMITTERS],
            complete: [false; MAX_EMITTERS],
            n: 0,
        }
    }

    pub fn len(&self) -> usize { self.n }
    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn get(&self, i: usize) -> Option<Emitter> {
        (i < self.n).then(|| Emitter {
            location: Cell::new(self.x[i], self.z[i]),
            duration: self.duration[i],
            due: self.due[i],
            complete: self.complete[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Emitter> + '_ {
        (0..self.n).filter_map(|i| self.get(i))
    }

    /// Append an emitter with explicit state
    pub fn spawn_at(&mut self, e: Emitter) -> Result<()> {
        if self.n >= MAX_EMITTERS {
            return Err(FieldError::TooManyEmitters { requested: self.n + 1, capacity: MAX_EMITTERS });
        }
        if !(e.duration > 0.0) {
            return Err(FieldError::InvalidDurationRange { min_ms: e.duration, max_ms: e.duration });
        }
        let i = self.n;
        self.write(i, e);
        self.n += 1;
        Ok(())
    }

    /// Truncate from the tail or append freshly spawned emitters.
    pub fn resize(
        &mut self,
        target: usize,
        now: f64,
        grid: &GridConfig,
        ripple: &RippleTuning,
        rng: &mut Rng,
    ) -> Result<()> {
        if target > MAX_EMITTERS {
            return Err(FieldError::TooManyEmitters { requested: target, capacity: MAX_EMITTERS });
        }
        if target <= self.n {
            self.n = target;
            return Ok(());
        }
        while self.n < target {
            let i = self.n;
            self.write(i, Emitter::spawn(now, grid, ripple, rng));
            self.n += 1;
        }
        Ok(())
    }

    /// Flag every emitter whose window has closed. Returns how many are
    /// complete afterwards.
    pub fn mark_expired(&mut self, now: f64, lead_ms: f64) -> usize {
        let mut expired = 0;
        for i in 0..self.n {
            if now >= self.due[i] - lead_ms {
                self.complete[i] = true;
            }
            expired += self.complete[i] as usize;
        }
        expired
    }

    /// Respawn every complete emitter in place. Returns the respawn count.
    pub fn respawn_complete(&mut self, now: f64, grid: &GridConfig, ripple: &RippleTuning, rng: &mut Rng) -> usize {
        let mut respawned = 0;
        for i in 0..self.n {
            if !self.complete[i] { continue; }

            let e = Emitter::spawn(now, grid, ripple, rng);
            log::trace!("emitter {i} respawned at ({}, {}) for {:.0} ms", e.location.x, e.location.z, e.duration);
            self.write(i, e);
            respawned += 1;
        }
        respawned
    }

    /// Age the pool to `now`: expire, then respawn. An emitter respawned here
    /// is not checked again against its new `due` until the next tick.
    pub fn tick(&mut self, now: f64, grid: &GridConfig, ripple: &RippleTuning, rng: &mut Rng) -> usize {
        self.mark_expired(now, ripple.lead_ms);
        self.respawn_complete(now, grid, ripple, rng)
    }

    /// Move every emitter into the grid's spawn region with a fresh lifetime
    pub fn respawn_all(&mut self, now: f64, grid: &GridConfig, ripple: &RippleTuning, rng: &mut Rng) {
        for i in 0..self.n {
            self.write(i, Emitter::spawn(now, grid, ripple, rng));
        }
    }

    #[inline]
    fn write(&mut self, i: usize, e: Emitter) {
        self.x[i] = e.location.x;
        self.z[i] = e.location.z;
        self.duration[i] = e.duration;
        self.due[i] = e.due;
        self.complete[i] = e.complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NOW: f64 = 1_700_000_000_000.0;

    fn fixture(count: usize, seed: u64) -> (EmitterPool, GridConfig, RippleTuning, Rng) {
        let grid = GridConfig::new(10, 2).unwrap();
        let ripple = RippleTuning::default();
        let mut rng = Rng::with_seed(seed);
        let mut pool = EmitterPool::new();
        pool.resize(count, NOW, &grid, &ripple, &mut rng).unwrap();
        (pool, grid, ripple, rng)
    }

    #[test]
    fn grow_spawns_fresh_emitters() {
        let (pool, grid, ripple, _) = fixture(12, 1);
        assert_eq!(pool.len(), 12);
        for e in pool.iter() {
            assert!(grid.in_spawn_region(e.location));
            assert!(!e.complete);
            assert!(e.duration >= ripple.min_duration_ms && e.duration <= ripple.max_duration_ms);
            assert_eq!(e.due, NOW + e.duration);
        }
    }

    #[test]
    fn shrink_truncates_tail() {
        let (mut pool, grid, ripple, mut rng) = fixture(5, 2);
        let head: Vec<Emitter> = pool.iter().take(2).collect();
        pool.resize(2, NOW, &grid, &ripple, &mut rng).unwrap();
        assert_eq!(pool.iter().collect::<Vec<_>>(), head);
    }

    #[test]
    fn resize_beyond_capacity_fails() {
        let (mut pool, grid, ripple, mut rng) = fixture(1, 3);
        let err = pool.resize(MAX_EMITTERS + 1, NOW, &grid, &ripple, &mut rng);
        assert!(matches!(err, Err(FieldError::TooManyEmitters { .. })));
        assert_eq!(pool.len(), 1);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    fn spawn_at_rejects_empty_lifetime(#[case] duration: f64) {
        let mut pool = EmitterPool::new();
        assert!(pool.spawn_at(Emitter::new(Cell::new(0, 0), duration, NOW)).is_err());
        assert!(pool.is_empty());
    }

    #[rstest]
    #[case(0.0)]
    #[case(50.0)]
    fn expiry_respects_lead(#[case] lead_ms: f64) {
        let mut pool = EmitterPool::new();
        pool.spawn_at(Emitter::new(Cell::new(3, 3), 1000.0, NOW + 1000.0)).unwrap();

        assert_eq!(pool.mark_expired(NOW + 1000.0 - lead_ms - 1.0, lead_ms), 0);
        assert_eq!(pool.mark_expired(NOW + 1000.0 - lead_ms, lead_ms), 1);
        assert!(pool.complete[0]);
    }

    #[test]
    fn tick_respawns_exactly_once() {
        let mut pool = EmitterPool::new();
        let grid = GridConfig::new(10, 0).unwrap();
        let ripple = RippleTuning { lead_ms: 0.0, ..Default::default() };
        let mut rng = Rng::with_seed(4);
        pool.spawn_at(Emitter::new(Cell::new(5, 5), 1000.0, NOW + 1000.0)).unwrap();

        assert_eq!(pool.tick(NOW + 999.0, &grid, &ripple, &mut rng), 0);
        assert_eq!(pool.tick(NOW + 1000.0, &grid, &ripple, &mut rng), 1);

        let e = pool.get(0).unwrap();
        assert!(!e.complete);
        assert!(e.due > NOW + 1000.0);
        // The fresh lifetime is at least min_duration long
        assert_eq!(pool.tick(NOW + 1001.0, &grid, &ripple, &mut rng), 0);
    }

    #[test]
    fn locations_stay_inside_margin_over_many_ticks() {
        let (mut pool, grid, ripple, mut rng) = fixture(MAX_EMITTERS, 5);
        let mut now = NOW;
        for _ in 0..500 {
            now += 250.0;
            pool.tick(now, &grid, &ripple, &mut rng);
            assert!(pool.iter().all(|e| grid.in_spawn_region(e.location) && !e.complete));
        }
    }
}
