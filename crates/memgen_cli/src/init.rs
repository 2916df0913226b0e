//! `memgen init`: project scaffolding command.
//!
//! Writes a `memgen.toml` with one example RAM instance so that
//! `memgen generate` works out of the box.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use memgen_config::CONFIG_FILE_NAME;

use crate::GlobalArgs;

/// Runs the `memgen init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory, refusing to
/// overwrite an existing `memgen.toml`.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{n}' already exists").into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };
    let path = init_project(&project_dir)?;
    if !global.quiet {
        eprintln!("     Created {}", path.display());
    }
    Ok(0)
}

/// Writes the project file into `root` and returns its path.
pub fn init_project(root: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(format!("{} already exists", path.display()).into());
    }
    let project_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my_project");
    write_memgen_toml(&path, project_name)?;
    Ok(path)
}

fn write_memgen_toml(path: &Path, name: &str) -> io::Result<()> {
    let content = format!(
        r#"[project]
name = "{name}"
version = "0.1.0"
dialect = "vhdl"
output_dir = "hdl"

# Clock generator bus bits: global clock, rising-edge tick, falling-edge tick.
[clock_bus]
global_clock = 4
rising_tick = 2
falling_tick = 3

[[ram]]
name = "ram0"
circuit = "main"
data_width = 8
address_width = 4
trigger = "rising_edge"
byte_enables = false

[ram.connections]
address = "s_address"
data_in = "s_data_in"
data_out = "s_data_out"
we = "s_we"
oe = "s_oe"
clock = {{ clock = "s_clock_bus_0" }}
"#
    );
    fs::write(path, content)
}
