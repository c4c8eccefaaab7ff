// Static carrier and aircraft reference data.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// Fallback used for aircraft codes missing from the table; `{code}` is replaced.
pub const DEFAULT_AIRCRAFT_FALLBACK: &str = "เครื่องบิน {code}";

const AIRLINES: &[(&str, &str)] = &[
    // Thailand
    ("TG", "Thai Airways"),
    ("WE", "Thai Smile"),
    ("FD", "Thai AirAsia"),
    ("XJ", "Thai AirAsia X"),
    ("SL", "Thai Lion Air"),
    ("DD", "Nok Air"),
    ("PG", "Bangkok Airways"),
    ("VZ", "Thai Vietjet Air"),
    // Southeast Asia
    ("AK", "AirAsia"),
    ("D7", "AirAsia X"),
    ("QZ", "Indonesia AirAsia"),
    ("Z2", "Philippines AirAsia"),
    ("MH", "Malaysia Airlines"),
    ("OD", "Batik Air Malaysia"),
    ("ID", "Batik Air"),
    ("SQ", "Singapore Airlines"),
    ("TR", "Scoot"),
    ("3K", "Jetstar Asia"),
    ("GA", "Garuda Indonesia"),
    ("JT", "Lion Air"),
    ("VN", "Vietnam Airlines"),
    ("VJ", "Vietjet Air"),
    ("QH", "Bamboo Airways"),
    ("PR", "Philippine Airlines"),
    ("5J", "Cebu Pacific"),
    ("K6", "Cambodia Angkor Air"),
    ("QV", "Lao Airlines"),
    ("8M", "Myanmar Airways International"),
    ("BI", "Royal Brunei Airlines"),
    // East Asia
    ("CX", "Cathay Pacific"),
    ("UO", "HK Express"),
    ("HX", "Hong Kong Airlines"),
    ("BR", "EVA Air"),
    ("CI", "China Airlines"),
    ("JX", "Starlux Airlines"),
    ("NH", "All Nippon Airways"),
    ("JL", "Japan Airlines"),
    ("MM", "Peach Aviation"),
    ("KE", "Korean Air"),
    ("OZ", "Asiana Airlines"),
    ("7C", "Jeju Air"),
    ("TW", "T'way Air"),
    ("LJ", "Jin Air"),
    ("CA", "Air China"),
    ("MU", "China Eastern Airlines"),
    ("CZ", "China Southern Airlines"),
    ("HU", "Hainan Airlines"),
    ("MF", "Xiamen Airlines"),
    ("3U", "Sichuan Airlines"),
    // South Asia
    ("AI", "Air India"),
    ("6E", "IndiGo"),
    ("UL", "SriLankan Airlines"),
    // Long haul
    ("EK", "Emirates"),
    ("QR", "Qatar Airways"),
    ("EY", "Etihad Airways"),
    ("TK", "Turkish Airlines"),
    ("LH", "Lufthansa"),
    ("BA", "British Airways"),
    ("AF", "Air France"),
    ("KL", "KLM Royal Dutch Airlines"),
    ("LX", "Swiss International Air Lines"),
    ("AY", "Finnair"),
    ("QF", "Qantas"),
    ("JQ", "Jetstar"),
    ("NZ", "Air New Zealand"),
    ("UA", "United Airlines"),
    ("AA", "American Airlines"),
    ("DL", "Delta Air Lines"),
    ("AC", "Air Canada"),
    ("ET", "Ethiopian Airlines"),
];

const AIRCRAFT: &[(&str, &str)] = &[
    // Airbus narrow-body
    ("319", "Airbus A319"),
    ("320", "Airbus A320"),
    ("32N", "Airbus A320neo"),
    ("321", "Airbus A321"),
    ("32Q", "Airbus A321neo"),
    ("221", "Airbus A220-100"),
    ("223", "Airbus A220-300"),
    // Airbus wide-body
    ("332", "Airbus A330-200"),
    ("333", "Airbus A330-300"),
    ("339", "Airbus A330-900neo"),
    ("359", "Airbus A350-900"),
    ("351", "Airbus A350-1000"),
    ("388", "Airbus A380-800"),
    // Boeing narrow-body
    ("737", "Boeing 737"),
    ("738", "Boeing 737-800"),
    ("739", "Boeing 737-900"),
    ("7M8", "Boeing 737 MAX 8"),
    ("7M9", "Boeing 737 MAX 9"),
    // Boeing wide-body
    ("744", "Boeing 747-400"),
    ("748", "Boeing 747-8"),
    ("772", "Boeing 777-200"),
    ("773", "Boeing 777-300"),
    ("77W", "Boeing 777-300ER"),
    ("788", "Boeing 787-8 Dreamliner"),
    ("789", "Boeing 787-9 Dreamliner"),
    ("78X", "Boeing 787-10 Dreamliner"),
    // Regional
    ("AT7", "ATR 72"),
    ("AT5", "ATR 42"),
    ("DH4", "De Havilland Dash 8-400"),
    ("E90", "Embraer E190"),
    ("E95", "Embraer E195"),
];

static AIRLINE_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AIRLINES.iter().copied().collect());

static AIRCRAFT_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AIRCRAFT.iter().copied().collect());

fn lookup(table: &HashMap<&'static str, &'static str>, code: &str) -> Option<&'static str> {
    table.get(code.trim().to_ascii_uppercase().as_str()).copied()
}

// Airline name for a carrier code, or the code itself when unknown.
pub fn airline_name(code: &str) -> String {
    lookup(&AIRLINE_NAMES, code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

// Aircraft name for a type code, falling back to [`DEFAULT_AIRCRAFT_FALLBACK`].
pub fn aircraft_name(code: &str) -> String {
    aircraft_name_with(code, DEFAULT_AIRCRAFT_FALLBACK)
}

// Aircraft name with a caller-provided `{code}` template for misses.
pub fn aircraft_name_with(code: &str, fallback: &str) -> String {
    match lookup(&AIRCRAFT_NAMES, code) {
        Some(name) => name.to_string(),
        None => fallback.replace("{code}", code),
    }
}
