//! Self-contained Leaflet page with one marker per feria.

use std::fmt::Write as _;

use serde::Serialize;

use ferias_core::{Day, FeriaRecord, MappedFeria, Stretch};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    color: &'static str,
    tooltip: String,
    popup: String,
}

/// Renders the map page. Markers are colored by day; the view is centered on
/// the mean of all marker positions.
pub(crate) fn render_map(ferias: &[MappedFeria], generated_at: &str) -> String {
    let markers: Vec<Marker> = ferias.iter().map(marker).collect();

    #[allow(clippy::cast_precision_loss)]
    let n = markers.len().max(1) as f64;
    let center_lat = markers.iter().map(|m| m.lat).sum::<f64>() / n;
    let center_lon = markers.iter().map(|m| m.lon).sum::<f64>() / n;

    // `</` inside a script block would end it early.
    let data = serde_json::to_string(&markers)
        .unwrap_or_else(|_| "[]".to_owned())
        .replace("</", "<\\/");

    let mut legend = String::new();
    for day in Day::ALL {
        let _ = write!(
            legend,
            r#"<div class="day"><span class="dot" style="background:{color}"></span>{name}</div>"#,
            color = day.color(),
            name = day.as_str(),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Ferias vecinales de Montevideo</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="{LEAFLET_CSS}">
<script src="{LEAFLET_JS}"></script>
<style>
  html, body, #map {{ height: 100%; margin: 0; }}
  .legend {{ position: fixed; bottom: 20px; left: 20px; z-index: 1000; background: #fff;
    border: 2px solid #666; border-radius: 8px; padding: 12px; font: 12px Arial, sans-serif;
    box-shadow: 0 2px 10px rgba(0,0,0,.3); }}
  .legend h4 {{ margin: 0 0 10px; text-align: center; border-bottom: 1px solid #ccc; padding-bottom: 6px; }}
  .legend .day {{ display: flex; align-items: center; margin: 4px 0; }}
  .legend .dot {{ width: 12px; height: 12px; border-radius: 50%; margin-right: 8px; display: inline-block; }}
  .legend small {{ display: block; margin-top: 8px; color: #777; }}
</style>
</head>
<body>
<div id="map"></div>
<div class="legend"><h4>Días de la semana</h4>{legend}<small>{count} ferias · {generated}</small></div>
<script>
const FERIAS = {data};
const map = L.map('map').setView([{center_lat}, {center_lon}], 13);
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
for (const f of FERIAS) {{
  L.circleMarker([f.lat, f.lon], {{ radius: 8, color: f.color, fillColor: f.color, fillOpacity: 0.85, weight: 2 }})
    .bindPopup(f.popup, {{ maxWidth: 350 }})
    .bindTooltip(f.tooltip)
    .addTo(map);
}}
</script>
</body>
</html>
"#,
        count = markers.len(),
        generated = escape_html(generated_at),
    )
}

fn marker(feria: &MappedFeria) -> Marker {
    let record = &feria.record;
    let color = record.day.color();
    let popup = format!(
        r#"<div style="font-family: Arial, sans-serif; min-width: 220px;"><h4 style="margin: 0 0 8px; border-bottom: 2px solid {color}; padding-bottom: 4px;">{barrio}</h4><p style="margin: 6px 0;"><strong>Ubicación:</strong> {location}</p><p style="margin: 6px 0;"><strong>Día:</strong> <span style="color: {color}; font-weight: bold;">{day}</span></p></div>"#,
        barrio = escape_html(&record.barrio),
        location = escape_html(&location(record)),
        day = record.day,
    );
    Marker {
        lat: feria.latitude,
        lon: feria.longitude,
        color,
        tooltip: escape_html(&format!("{} - {}", record.barrio, record.day)),
        popup,
    }
}

/// Human description of where the feria sets up.
pub(crate) fn location(record: &FeriaRecord) -> String {
    match &record.stretch {
        Stretch::Range { from, to } => format!("{} entre {from} y {to}", record.street),
        Stretch::Corner { cross } => format!("{} y {cross}", record.street),
        Stretch::Street => record.street.clone(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
