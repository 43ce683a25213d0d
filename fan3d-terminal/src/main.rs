/// FAN3D Terminal Simulator
///
/// Interactive 3D fan simulation rendered as ASCII in the terminal.
/// Controls:
///   - Up/Down: Adjust fan speed
///   - Space: Toggle oscillation
///   - O: Toggle power
///   - L: Cycle lighting modes
///   - 1-5: Switch fan type
///   - WASD/Left/Right: Orbit the view
///   - Q/ESC: Quit
use clap::{Parser, ValueEnum};
use fan3d_core::{FanModel, FanType};
use fan3d_terminal::{ProjectionMode, TerminalApp};
use std::error::Error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FanTypeArg {
    Ceiling,
    Table,
    Tower,
    Industrial,
    Desk,
}

impl From<FanTypeArg> for FanType {
    fn from(arg: FanTypeArg) -> Self {
        match arg {
            FanTypeArg::Ceiling => FanType::Ceiling,
            FanTypeArg::Table => FanType::Table,
            FanTypeArg::Tower => FanType::Tower,
            FanTypeArg::Industrial => FanType::Industrial,
            FanTypeArg::Desk => FanType::Desk,
        }
    }
}

#[derive(Parser)]
#[command(name = "fan3d-terminal", about = "Interactive 3D fan simulator for the terminal")]
struct Cli {
    /// Fan type to start with
    #[arg(long, value_enum, default_value = "ceiling")]
    fan_type: FanTypeArg,
    /// Render with an orthographic projection
    #[arg(long)]
    ortho: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // Fail on configuration problems before the terminal enters raw mode
    let model = FanModel::new(cli.fan_type.into())?;

    println!("FAN3D Terminal Simulator - Loading...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(model)?;
    if cli.ortho {
        app.set_projection(ProjectionMode::Orthographic);
    }
    app.run()?;

    println!("Thank you for using FAN3D!");
    Ok(())
}
