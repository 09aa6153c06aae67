use std::error::Error;

use clap::Parser;

use blockdrop::{Args, Settings, app};

fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from(Args::parse());
    app::run(settings)
}
