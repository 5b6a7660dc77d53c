// Table layout shared with the mobile sync server (column names are Spanish
// on purpose: the same `activos` table is read by other clients).

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS activos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sync_id TEXT UNIQUE NOT NULL,
    codigo TEXT UNIQUE NOT NULL CHECK (length(codigo) > 0),
    nombre TEXT NOT NULL CHECK (length(trim(nombre)) > 0),
    edificio TEXT,
    nivel TEXT,
    categoria TEXT,
    espacio TEXT,
    serie TEXT,
    updated_at TEXT,              -- %Y-%m-%d %H:%M:%S%.f, local time
    deleted INTEGER DEFAULT 0     -- 0 = active
);

CREATE INDEX IF NOT EXISTS idx_activos_sync_id ON activos(sync_id);
CREATE INDEX IF NOT EXISTS idx_activos_updated_at ON activos(updated_at);
"#;
