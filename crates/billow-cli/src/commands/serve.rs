//! Serve command implementation

use std::path::Path;

use anyhow::Result;

use billow_server::Database;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = Database::new(&db_path.to_string_lossy())?;

    println!("🚀 Billow server listening on http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Serving static files from {}", dir.display());
    }

    let static_dir = static_dir.map(|p| p.to_string_lossy().to_string());
    billow_server::serve(db, host, port, static_dir.as_deref()).await
}
