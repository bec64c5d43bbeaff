/// Filter one text field's raw content into a syntactically valid, possibly
/// incomplete, signed decimal string. Runs after every keystroke, so partial
/// input like "-", "3." or "-0." must survive unchanged.
///
/// Rules, in order: strip everything that is not a digit, '.' or '-'; keep a
/// '-' only as the very first remaining character; keep only the first '.'
/// (digits after later points are retained, the points themselves dropped).
pub fn sanitize(raw: &str) -> String {
    let mut clean = String::with_capacity(raw.len());
    let mut seen_point = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => clean.push(c),
            '-' if clean.is_empty() => clean.push('-'),
            '.' if !seen_point => {
                clean.push('.');
                seen_point = true;
            }
            _ => {}
        }
    }

    clean
}

/// Parse a sanitized field into a component value. Text that does not parse
/// to a finite number (empty field, lone "-", lone ".") counts as 0.
pub fn parse_component(text: &str) -> f64 {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
