use anyhow::Result;
use pixfont::{color::Color, font::Font};

// renders a couple of strings with the bundled font and writes them out
// as a PNG next to the working directory
fn main() -> Result<()> {
    env_logger::init();

    let font = Font::default_font()?;

    let text = "Hello, world!\n0123456789 <=> {~}";
    let (w, h) = font.measure(text);
    println!("\"{}\" measures {}x{} px", text.escape_debug(), w, h);

    let surface = font.render(text, Color::new(1.0, 0.8, 0.2));
    surface.save_png("text.png")?;
    println!("wrote text.png ({}x{})", surface.width, surface.height);

    Ok(())
}
