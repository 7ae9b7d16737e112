// src/common/db_utils.rs

// Limite de parâmetros ($1..$N) por comando no protocolo do Postgres
pub const PG_BIND_LIMIT: usize = 65_535;

/// Quantas linhas cabem num único INSERT multi-linha com `binds_per_row`
/// parâmetros por linha.
pub(crate) fn rows_per_insert(binds_per_row: usize) -> usize {
    (PG_BIND_LIMIT / binds_per_row.max(1)).max(1)
}
