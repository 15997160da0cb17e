// src/common/db_utils.rs

use uuid::Uuid;

/// IDs vêm da URL ou do corpo como texto. Um ID malformado não referencia
/// nenhum registro, então quem chama trata `None` como "não encontrado".
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Monta o padrão `ILIKE` de "contém", tratando a entrada como texto literal.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
