//! Resource percentage math for container stats.
//!
//! The runtime reports raw counters; these helpers turn them into the
//! percentages the dashboard shows. Zero denominators yield 0.0 so NaN and
//! infinity never reach a JSON body.

/// CPU utilisation percentage from consecutive usage deltas.
pub fn cpu_percent(cpu_delta: u64, system_delta: u64) -> f64 {
    if system_delta == 0 {
        return 0.0;
    }
    (cpu_delta as f64 / system_delta as f64) * 100.0
}

/// Memory utilisation percentage from usage and limit.
pub fn memory_percent(usage: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    (usage as f64 / limit as f64) * 100.0
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_percent_zero_denominator_is_zero() {
        let percent = cpu_percent(123_456, 0);
        assert_eq!(percent, 0.0);
        assert!(percent.is_finite());
    }

    #[test]
    fn test_cpu_percent_half_usage() {
        assert_eq!(cpu_percent(50, 100), 50.0);
    }

    #[test]
    fn test_memory_percent_zero_limit_is_zero() {
        assert_eq!(memory_percent(1024, 0), 0.0);
    }

    #[test]
    fn test_memory_percent_quarter() {
        assert_eq!(memory_percent(256, 1024), 25.0);
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(2 * 1024 * 1024), 2.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(0.005), 0.01);
    }
}
