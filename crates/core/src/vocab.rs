pub static LEVEL_UP: [&str; 8] = ["1MS", "1UNE", "2BA", "2BC", "2BG", "2UNE", "2US", "5BA"];

pub static SM_UNITS: [&str; 12] = [
    "OPH BKK1", "OPH BKK2", "OPH BKK3", "OPH UPC1", "OPH UPC2", "OPH UPC3", "ORT BKK1",
    "ORT BKK2", "ORT UPC1", "ORT UPC2", "OTC BKK", "OTC UPC",
];

pub fn is_level_up(token: &str) -> bool {
    LEVEL_UP.contains(&token)
}

pub fn is_sm_unit(token: &str) -> bool {
    SM_UNITS.contains(&token)
}
