/// Active ISO 4217 alphabetic codes. Declared statically rather than
/// derived at runtime so membership checks stay allocation-free.
pub const ISO_4217: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL",
    "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHF", "CLP", "CNY",
    "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP",
    "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD",
    "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS",
    "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR",
    "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD",
    "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU",
    "MUR", "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK",
    "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG",
    "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK",
    "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL",
    "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH",
    "UGX", "USD", "UYU", "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD",
    "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

/// True when the cell, upper-cased, is exactly an ISO 4217 code.
pub fn is_currency_code(cell: &str) -> bool {
    let upper = cell.trim().to_uppercase();
    ISO_4217.contains(&upper.as_str())
}

/// Find an ISO code embedded in an amount cell ("12.34 EUR", "EUR 12.34",
/// "12.34EUR"). Returns the code and the cell with the code removed.
pub fn extract_code(cell: &str) -> Option<(String, String)> {
    // Whole whitespace-separated token first.
    for token in cell.split_whitespace() {
        let upper = token.to_uppercase();
        if ISO_4217.contains(&upper.as_str()) {
            let rest = cell
                .split_whitespace()
                .filter(|t| *t != token)
                .collect::<Vec<_>>()
                .join(" ");
            return Some((upper, rest));
        }
    }
    // Then a code glued to the leading or trailing end of the value. Codes
    // are ASCII, so a multi-byte character across the split point rules the
    // branch out; the remainder must not continue with a letter, otherwise
    // ordinary words shed their last three letters ("dollars" is not ARS).
    let trimmed = cell.trim();
    if trimmed.len() > 3 && trimmed.is_char_boundary(3) {
        let (head, tail) = trimmed.split_at(3);
        let upper = head.to_uppercase();
        if ISO_4217.contains(&upper.as_str())
            && !tail.starts_with(|c: char| c.is_alphabetic())
        {
            return Some((upper, tail.trim().to_string()));
        }
    }
    if trimmed.len() > 3 && trimmed.is_char_boundary(trimmed.len() - 3) {
        let (head, tail) = trimmed.split_at(trimmed.len() - 3);
        let upper = tail.to_uppercase();
        if ISO_4217.contains(&upper.as_str())
            && !head.ends_with(|c: char| c.is_alphabetic())
        {
            return Some((upper, head.trim().to_string()));
        }
    }
    None
}
