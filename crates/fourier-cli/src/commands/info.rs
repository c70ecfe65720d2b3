//! Image info command.

use crate::InfoArgs;
use anyhow::Result;
use fourier_io::Format;

/// Prints one summary line per input, plus format and channels when verbose.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        println!("{}: {}", path.display(), image);

        if verbose > 0 {
            let format = Format::detect(path).unwrap_or(Format::Unknown);
            let names: Vec<String> = image.channels().iter().map(|c| c.to_string()).collect();
            println!("  Format:   {}", format);
            println!("  Channels: {}", names.join(", "));
            println!("  Pixels:   {}", image.pixel_count());
        }
    }
    Ok(())
}
