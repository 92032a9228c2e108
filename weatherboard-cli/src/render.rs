use weatherboard_core::{NormalizedObservation, ProviderId, ViewState};

/// The home index: one line per provider with the route that opens it.
pub fn home(entries: &[ProviderId]) -> String {
    let index: String = entries
        .iter()
        .map(|id| format!("  {:<16} {}\n", id.route(), id.display_name()))
        .collect();
    format!("Weather App\nSelect a source:\n{index}")
}

pub fn view(id: ProviderId, state: &ViewState) -> String {
    match state {
        ViewState::Loading => format!("Loading {}...\n", id.display_name()),
        ViewState::Ready(observation) => card(id, observation),
    }
}

pub fn card(id: ProviderId, obs: &NormalizedObservation) -> String {
    format!(
        "{name}\n{icon}  {temp}º  {condition}\n  🌬️  {wind} km/h\n  ☁️  {humidity} %\n  ☀️  {uv} of 10\n",
        name = id.display_name(),
        icon = header_icon(id),
        temp = display_degrees(obs.temperature),
        condition = obs.condition,
        wind = display_wind(id, obs.windspeed),
        humidity = obs.humidity,
        uv = obs.uv,
    )
}

/// Nearest whole degree, halves rounded up (`-2.5` shows as `-2`).
fn display_degrees(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

/// Converted m/s readings always keep their decimal; km/h readings are shown as
/// the provider sent them.
fn display_wind(id: ProviderId, kph: f64) -> String {
    if id.reports_wind_in_mps() {
        format!("{kph:.1}")
    } else {
        kph.to_string()
    }
}

fn header_icon(id: ProviderId) -> &'static str {
    match id {
        ProviderId::WeatherApi => "⛅",
        _ => "☀️",
    }
}
