//! Built-in destination data.
//!
//! A small, hand-curated universe of cities used when no catalog file is
//! configured. Each table is `(code, ...)` with codes that must parse as
//! `CityCode`s; malformed rows are skipped when the catalog is built.

pub(super) const CITIES: &[(&str, &str, &str, &[&str])] = &[
    ("BCN", "Barcelona", "Spain", &["Sagrada Familia", "Park Güell", "La Rambla", "Barceloneta Beach"]),
    ("MAD", "Madrid", "Spain", &["Prado Museum", "Royal Palace", "Retiro Park", "Plaza Mayor"]),
    ("LIS", "Lisbon", "Portugal", &["Belém Tower", "Jerónimos Monastery", "Alfama District", "Time Out Market"]),
    ("VAL", "Valencia", "Spain", &["City of Arts and Sciences", "Valencia Cathedral", "Malvarrosa Beach", "Central Market"]),
    ("POR", "Porto", "Portugal", &["Ribeira District", "Dom Luís I Bridge", "Porto Cathedral", "Wine Cellars"]),
    ("PAR", "Paris", "France", &["Eiffel Tower", "Louvre Museum", "Notre-Dame Cathedral", "Montmartre"]),
    ("ROM", "Rome", "Italy", &["Colosseum", "Vatican Museums", "Trevi Fountain", "Roman Forum"]),
    ("AMS", "Amsterdam", "Netherlands", &["Anne Frank House", "Van Gogh Museum", "Canal Cruise", "Vondelpark"]),
    ("BER", "Berlin", "Germany", &["Brandenburg Gate", "Berlin Wall Memorial", "Museum Island", "Reichstag Building"]),
    ("SVQ", "Seville", "Spain", &["Alcázar Palace", "Seville Cathedral", "Plaza de España", "Barrio Santa Cruz"]),
    ("MIL", "Milan", "Italy", &["Milan Cathedral", "Galleria Vittorio Emanuele II", "Sforza Castle", "The Last Supper"]),
    ("ATH", "Athens", "Greece", &["Acropolis", "Parthenon", "National Archaeological Museum", "Plaka District"]),
    ("TYO", "Tokyo", "Japan", &[]),
    ("BKK", "Bangkok", "Thailand", &[]),
    ("SIN", "Singapore", "Singapore", &[]),
    ("HKG", "Hong Kong", "China", &[]),
    ("BJS", "Beijing", "China", &[]),
    ("SEL", "Seoul", "South Korea", &[]),
    ("KUL", "Kuala Lumpur", "Malaysia", &[]),
    ("SGN", "Ho Chi Minh City", "Vietnam", &[]),
    ("NYC", "New York", "United States", &[]),
    ("LAX", "Los Angeles", "United States", &[]),
    ("MIA", "Miami", "United States", &[]),
    ("MEX", "Mexico City", "Mexico", &[]),
    ("RIO", "Rio de Janeiro", "Brazil", &[]),
    ("BOG", "Bogota", "Colombia", &[]),
    ("LIM", "Lima", "Peru", &[]),
    ("BUE", "Buenos Aires", "Argentina", &[]),
];

pub(super) const CONTINENTS: &[(&str, &[&str])] = &[
    ("Europe", &["BCN", "MAD", "LIS", "VAL", "POR", "PAR", "ROM", "AMS", "BER", "SVQ", "MIL", "ATH"]),
    ("Asia", &["TYO", "BKK", "SIN", "HKG", "BJS", "SEL", "KUL", "SGN"]),
    ("America", &["NYC", "LAX", "MIA", "MEX", "RIO", "BOG", "LIM", "BUE"]),
];

pub(super) const INTERESTS: &[(&str, &[&str])] = &[
    ("culture", &["BCN", "MAD", "PAR", "ROM", "ATH", "BER", "TYO", "NYC", "VAL", "LIS"]),
    ("beach", &["BCN", "LIS", "VAL", "BKK", "MIA", "RIO", "SVQ", "ATH"]),
    ("food", &["BCN", "MAD", "PAR", "VAL", "ROM", "TYO", "BKK", "MEX", "MIL", "LIS", "POR"]),
    ("nature", &["POR", "SVQ", "BER", "BJS", "RIO", "BOG", "AMS", "LIM"]),
    ("shopping", &["PAR", "MIL", "BER", "HKG", "NYC", "LAX", "MAD", "BCN"]),
    ("history", &["ROM", "ATH", "BER", "BCN", "MAD", "PAR", "SVQ", "LIS"]),
    ("nightlife", &["BCN", "MAD", "PAR", "BER", "NYC", "MIA", "BKK", "RIO"]),
];
