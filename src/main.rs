use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use qrforge::render::to_str;
use qrforge::{write_image, ECLevel, ImageFormat, QRBuilder};

#[derive(Parser)]
#[command(name = "qrforge", version, about = "Encode printable ASCII text as a QR code")]
struct Cli {
    /// Text to encode
    data: String,
    /// Output image, PNG or JPEG depending on the extension
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Minimum error correction level: L, M, Q or H
    #[arg(short = 'l', long = "level", default_value = "L")]
    ec_level: ECLevel,
    /// Image width and height in pixels
    #[arg(short, long, default_value_t = 100)]
    size: u32,
    /// Quiet zone in modules, at least 4
    #[arg(short, long, default_value_t = 4)]
    border: usize,
    /// Print the symbol to the terminal
    #[arg(long)]
    text: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut builder = QRBuilder::new(cli.data.as_bytes());
    builder.ec_level(cli.ec_level).dimensions(cli.size).border(cli.border);

    if cli.text || cli.output.is_none() {
        let symbol = builder.build()?;
        println!("{}", to_str(&symbol, 1));
    }

    if let Some(path) = &cli.output {
        let format = ImageFormat::from_path(path)?;
        let img = builder.render()?;
        let mut file = BufWriter::new(File::create(path)?);
        write_image(&img, format, &mut file)?;
        eprintln!("Wrote {} ({})", path.display(), format.mime_type());
    }

    Ok(())
}
