mod achieve;
mod models;
mod report;
mod run;
mod stats;
mod store;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    let mut store = store::Store::open(&data_dir)?;
    let now = chrono::Local::now().naive_local();
    run::as_cli(&args, &mut store, now)
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "kakeibo", "Kakeibo")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
