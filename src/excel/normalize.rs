/// Normaliza nombres de columnas y de abas para comparar sin depender de
/// mayúsculas, acentos ni espacios repetidos.
///
/// - pasa a minúsculas y recorta
/// - colapsa secuencias de espacios en uno solo
/// - reemplaza vocales acentuadas y la `ç` por su versión sin acento
///
/// `normalize_name("  MANHÃ ") == "manha"`, `normalize_name("Médicos   2") == "medicos 2"`.
pub fn normalize_name(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for word in lower.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(strip_accent));
    }
    out
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'ã' | 'â' | 'à' | 'ä' => 'a',
        'é' | 'ê' | 'è' | 'ë' => 'e',
        'í' | 'î' | 'ì' | 'ï' => 'i',
        'ó' | 'õ' | 'ô' | 'ò' | 'ö' => 'o',
        'ú' | 'ü' | 'û' | 'ù' => 'u',
        'ç' => 'c',
        other => other,
    }
}
