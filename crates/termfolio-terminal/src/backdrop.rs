//! Background visual effects: matrix rain, floating code, screen flicker.
//!
//! The backdrop is purely presentational. It owns its own clock and RNG and
//! never sees the session's history, transcript, or input; the front end
//! hands it the one bit it needs (whether matrix mode is on) when asking for
//! the rain opacity.

use std::time::Duration;

use termfolio_types::config::BackdropConfig;

const RAIN_GLYPHS: &[char] = &[
    '0', '1', 'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ｵ', 'ﾘ', 'ｱ', 'ﾎ', 'ﾃ',
    'ﾏ', 'ｹ', 'ﾒ', 'ｴ', 'ｶ', 'ｷ', 'ﾑ', 'ﾕ', 'ﾗ', 'ｾ', 'ﾈ', 'ｽ', 'ﾀ', 'ﾇ', 'ﾍ',
];

const CODE_SNIPPETS: &[&str] = &[
    "function optimizeSystem() {",
    "if (threat.detected) {",
    "const security = new Shield();",
    "docker run -d --name app",
    "sudo systemctl start",
    "#!/bin/bash",
    "SELECT * FROM projects",
    "npm install --production",
    "git commit -m \"feat:\"",
    "<div className=\"portfolio\">",
    "axios.get(\"/api/data\")",
    "useEffect(() => {",
    "const [state, setState]",
    "php artisan migrate",
    "mysql -u root -p",
    "ssh user@server.com",
];

const FLICKER_PERIOD: Duration = Duration::from_millis(100);
const FLICKER_LENGTH: Duration = Duration::from_millis(50);
/// Chance per flicker period, in percent.
const FLICKER_CHANCE: u64 = 2;

pub const MATRIX_OPACITY_ON: f32 = 0.15;
pub const MATRIX_OPACITY_OFF: f32 = 0.05;

/// Xorshift64 generator; enough for decoration.
#[derive(Debug, Clone)]
struct EffectRng(u64);

impl EffectRng {
    fn new(seed: u64) -> Self {
        // Xorshift has a fixed point at zero.
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// One falling column of glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct RainColumn {
    /// Horizontal position, percent of width.
    pub left_pct: f32,
    pub fall: Duration,
    pub delay: Duration,
    pub glyphs: String,
}

/// A code snippet drifting across the background.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFloat {
    /// Spawn sequence number, starting at 1.
    pub id: u64,
    pub left_pct: f32,
    pub text: &'static str,
    pub age: Duration,
}

/// State of every background effect.
#[derive(Debug, Clone)]
pub struct Backdrop {
    config: BackdropConfig,
    rng: EffectRng,
    rain: Vec<RainColumn>,
    floats: Vec<CodeFloat>,
    spawned: u64,
    since_spawn: Duration,
    since_flicker_roll: Duration,
    flicker_left: Duration,
}

impl Backdrop {
    pub fn new(config: BackdropConfig) -> Self {
        let seed = if config.seed == 0 {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64
        } else {
            config.seed
        };
        let mut rng = EffectRng::new(seed);
        let rain = (0..config.rain_columns)
            .map(|_| RainColumn {
                left_pct: rng.unit() * 100.0,
                fall: Duration::from_secs_f32(rng.unit() * 3.0 + 2.0),
                delay: Duration::from_secs_f32(rng.unit() * 2.0),
                glyphs: (0..config.rain_length)
                    .map(|_| RAIN_GLYPHS[rng.below(RAIN_GLYPHS.len() as u64) as usize])
                    .collect(),
            })
            .collect();
        Self {
            config,
            rng,
            rain,
            floats: Vec::new(),
            spawned: 0,
            since_spawn: Duration::ZERO,
            since_flicker_roll: Duration::ZERO,
            flicker_left: Duration::ZERO,
        }
    }

    /// Advance every effect by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        let lifetime = Duration::from_millis(self.config.float_lifetime_ms);
        for float in &mut self.floats {
            float.age += elapsed;
        }
        self.floats.retain(|f| f.age < lifetime);

        let interval = Duration::from_millis(self.config.float_interval_ms);
        self.since_spawn += elapsed;
        while self.since_spawn >= interval {
            self.since_spawn -= interval;
            if self.floats.len() < self.config.max_floats {
                let text = CODE_SNIPPETS[self.rng.below(CODE_SNIPPETS.len() as u64) as usize];
                self.spawned += 1;
                self.floats.push(CodeFloat {
                    id: self.spawned,
                    left_pct: self.rng.unit() * 100.0,
                    text,
                    age: Duration::ZERO,
                });
            }
        }

        self.flicker_left = self.flicker_left.saturating_sub(elapsed);
        self.since_flicker_roll += elapsed;
        while self.since_flicker_roll >= FLICKER_PERIOD {
            self.since_flicker_roll -= FLICKER_PERIOD;
            if self.rng.below(100) < FLICKER_CHANCE {
                self.flicker_left = FLICKER_LENGTH;
            }
        }
    }

    /// Rain opacity for the given matrix mode.
    pub fn rain_opacity(matrix_enabled: bool) -> f32 {
        if matrix_enabled {
            MATRIX_OPACITY_ON
        } else {
            MATRIX_OPACITY_OFF
        }
    }

    /// Screen brightness multiplier (a short pulse while flickering).
    pub fn brightness(&self) -> f32 {
        if self.flicker_left > Duration::ZERO { 1.1 } else { 1.0 }
    }

    pub fn rain(&self) -> &[RainColumn] {
        &self.rain
    }

    pub fn floats(&self) -> &[CodeFloat] {
        &self.floats
    }

    /// Total floats spawned so far, including expired ones.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Backdrop {
        Backdrop::new(BackdropConfig {
            seed: 7,
            ..BackdropConfig::default()
        })
    }

    #[test]
    fn rain_columns_follow_config() {
        let b = seeded();
        assert_eq!(b.rain().len(), 50);
        for col in b.rain() {
            assert_eq!(col.glyphs.chars().count(), 20);
            assert!((0.0..100.0).contains(&col.left_pct));
            assert!(col.fall >= Duration::from_secs(2) && col.fall <= Duration::from_secs(5));
            assert!(col.delay <= Duration::from_secs(2));
        }
    }

    #[test]
    fn same_seed_same_rain() {
        assert_eq!(seeded().rain(), seeded().rain());
    }

    #[test]
    fn floats_spawn_on_interval() {
        let mut b = seeded();
        b.tick(Duration::from_millis(2999));
        assert!(b.floats().is_empty());
        b.tick(Duration::from_millis(1));
        assert_eq!(b.floats().len(), 1);
        assert!(CODE_SNIPPETS.contains(&b.floats()[0].text));
    }

    #[test]
    fn floats_expire_after_lifetime() {
        let mut b = Backdrop::new(BackdropConfig {
            seed: 3,
            float_interval_ms: 1000,
            float_lifetime_ms: 2500,
            ..BackdropConfig::default()
        });
        for _ in 0..10 {
            b.tick(Duration::from_millis(1000));
        }
        // Spawned at t=9s and t=10s survive; t=8s is 2s old and also alive.
        assert_eq!(b.floats().len(), 3);
        assert!(b.floats().iter().all(|f| f.age < Duration::from_millis(2500)));
    }

    #[test]
    fn float_ids_keep_counting_past_expiry() {
        let mut b = seeded();
        for _ in 0..600 {
            b.tick(Duration::from_millis(100));
        }
        // One spawn per 3s over 60s; the oldest have expired by now.
        assert_eq!(b.spawned(), 20);
        assert_eq!(b.floats().len(), 5);
        let ids: Vec<u64> = b.floats().iter().map(|f| f.id).collect();
        assert_eq!(ids, [16, 17, 18, 19, 20]);
    }

    #[test]
    fn float_count_is_capped() {
        let mut b = Backdrop::new(BackdropConfig {
            seed: 11,
            float_interval_ms: 100,
            float_lifetime_ms: 60_000,
            max_floats: 4,
            ..BackdropConfig::default()
        });
        b.tick(Duration::from_secs(5));
        assert_eq!(b.floats().len(), 4);
    }

    #[test]
    fn flicker_is_short_pulse() {
        let mut b = seeded();
        let mut saw_flicker = false;
        for _ in 0..5000 {
            b.tick(FLICKER_PERIOD);
            if b.brightness() > 1.0 {
                saw_flicker = true;
                b.tick(FLICKER_LENGTH);
                // The pulse ends unless a new roll fires in the same window.
                assert!(b.flicker_left <= FLICKER_LENGTH);
            }
        }
        assert!(saw_flicker, "2% per 100ms should fire within 500s");
    }

    #[test]
    fn opacity_follows_matrix_flag() {
        assert_eq!(Backdrop::rain_opacity(true), MATRIX_OPACITY_ON);
        assert_eq!(Backdrop::rain_opacity(false), MATRIX_OPACITY_OFF);
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = EffectRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }
}
