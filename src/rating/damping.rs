use crate::config::RatingSettings;

/// Volatility multiplier for a player with `games_played` prior matches.
///
/// Falls linearly from 1.0 and stops at the cap: with the default settings a
/// player at 400 games or more always scores at 0.2.
pub fn trial_factor(games_played: u32, settings: &RatingSettings) -> f64 {
    let effective_games = games_played.min(settings.games_cap);
    1.0 - effective_games as f64 * settings.damping_per_game
}

/// Pull toward the table: positive when the player is rated below the field.
pub fn correction(field_average: f64, rating: f64, settings: &RatingSettings) -> f64 {
    (field_average - rating) / settings.correction_divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_undamped() {
        assert_eq!(trial_factor(0, &RatingSettings::default()), 1.0);
    }

    #[test]
    fn test_damping_floor_at_cap() {
        let settings = RatingSettings::default();
        let floor = 1.0 - 400.0 * 0.002;

        assert_eq!(trial_factor(400, &settings), floor);
        assert_eq!(trial_factor(401, &settings), floor);
        assert_eq!(trial_factor(10_000, &settings), floor);
        assert!((floor - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_damping_is_linear_below_cap() {
        let settings = RatingSettings::default();
        assert!((trial_factor(100, &settings) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_correction_sign() {
        let settings = RatingSettings::default();
        assert_eq!(correction(1500.0, 1460.0, &settings), 1.0);
        assert_eq!(correction(1500.0, 1540.0, &settings), -1.0);
        assert_eq!(correction(1500.0, 1500.0, &settings), 0.0);
    }
}
