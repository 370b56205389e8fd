use anyhow::{Context, Result};
use log::info;
use rgbpng::config::GradientConfig;
use rgbpng::{gradient, logger, png_writer};
use std::env;

fn fail() -> ! {
    std::process::exit(1);
}

fn render(config: &GradientConfig) -> Result<()> {
    info!("Rendering a {}x{} gradient", config.width, config.height);
    let mut colors = gradient::vertical_gradient(config.width, config.height);
    if config.gamma {
        gradient::apply_gamma(&mut colors);
    }

    png_writer::write_png(&config.output, &colors, config.width, config.height)
        .with_context(|| format!("Failed to save the gradient to {}", config.output.display()))
}

fn main() {
    let args: Vec<_> = env::args().collect();

    if args.len() > 2 {
        let bin_name = args.first().map(String::as_str).unwrap_or("gradient");
        eprintln!("Usage: {} [CONFIG]", bin_name);
        fail();
    }

    let config = match args.get(1) {
        Some(config_path) => match GradientConfig::load(config_path) {
            Ok(config) => config,
            Err(err) => {
                for cause in err.chain() {
                    eprintln!("{}", cause);
                }
                fail();
            }
        },
        None => GradientConfig::default(),
    };

    if let Err(err) = logger::init(config.log_level) {
        eprintln!("Failed to initialize logging: {}", err);
        fail();
    }

    match render(&config) {
        Ok(_) => info!("Successfully saved the gradient to {}", config.output.display()),
        Err(err) => {
            for cause in err.chain() {
                eprintln!("{}", cause);
            }
            fail();
        }
    }
}
