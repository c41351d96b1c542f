// src/session/delay.rs — Typing-pace simulation
//
// The bot waits a little before "typing" its reply so the pace feels
// natural. The delay is a pure function of reply length plus a small
// jitter; tests inject `no_delay` instead.

use std::sync::Arc;
use std::time::Duration;

pub type DelayFn = Arc<dyn Fn(usize) -> Duration + Send + Sync>;

const BASE_MS: u64 = 500;
const PER_CHAR_MS: u64 = 5;
const CHAR_CAP_MS: u64 = 2500;
const JITTER_MS: i64 = 200;
const FLOOR_MS: i64 = 600;

/// `clamp(500 + min(len*5, 2500) + uniform(-200, 200), min 600)` ms.
pub fn natural_typing_delay(response_len: usize) -> Duration {
    let chars = (response_len as u64 * PER_CHAR_MS).min(CHAR_CAP_MS);
    let total = (BASE_MS + chars) as i64 + jitter();
    Duration::from_millis(total.max(FLOOR_MS) as u64)
}

pub fn no_delay(_response_len: usize) -> Duration {
    Duration::ZERO
}

fn jitter() -> i64 {
    let mut buf = [0u8; 4];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    let raw = u32::from_le_bytes(buf);
    (raw % (2 * JITTER_MS as u32 + 1)) as i64 - JITTER_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reply_hits_the_floor() {
        for _ in 0..50 {
            let d = natural_typing_delay(0);
            assert!(d >= Duration::from_millis(600));
            assert!(d <= Duration::from_millis(700));
        }
    }

    #[test]
    fn test_char_component_is_capped() {
        // 10_000 chars would be 50s uncapped; cap keeps it at 2.5s + base + jitter
        for _ in 0..50 {
            let d = natural_typing_delay(10_000);
            assert!(d >= Duration::from_millis(2800));
            assert!(d <= Duration::from_millis(3200));
        }
    }

    #[test]
    fn test_delay_scales_with_length_band() {
        for _ in 0..50 {
            let d = natural_typing_delay(200);
            // 500 + 1000 ± 200
            assert!(d >= Duration::from_millis(1300));
            assert!(d <= Duration::from_millis(1700));
        }
    }

    #[test]
    fn test_no_delay_is_zero() {
        assert_eq!(no_delay(5000), Duration::ZERO);
    }
}
