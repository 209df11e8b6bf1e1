/// Render a multiplier as a percentage with one decimal place, e.g. `2.5` as
/// `"250.0%"`.
pub fn format_clock_speed(multiplier: f64) -> String {
    format!("{:.1}%", multiplier * 100.0)
}
