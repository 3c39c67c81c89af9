use rgui_redux::{ControlKind, ICONS_SIGNATURE, StyleStore, parse_icons_binary, parse_style};
use std::{env, error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let input = parse_input_arg()?;
    let data = fs::read(&input)?;
    if data.starts_with(ICONS_SIGNATURE) {
        print_icons(&data)
    } else {
        print_style(&data)
    }
}

fn parse_input_arg() -> Result<PathBuf, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Err("usage: rgs_info <style.rgs | style.txt.rgs | icons.rgi>".into()),
    }
}

fn print_style(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let asset = parse_style(data)?;
    println!("{} property records", asset.records.len());
    for r in &asset.records {
        let kind = match ControlKind::from_index(r.control) {
            Some(k) => format!("{:?}", k),
            None => format!("#{}", r.control),
        };
        println!("  {:<12} {:>2} = 0x{:08x}", kind, r.property, r.value);
    }

    // the records must also apply cleanly on top of the defaults
    let mut store = StyleStore::new();
    store.load_default();
    store.apply_records(&asset.records)?;

    if let Some(font) = &asset.font_request {
        println!("font request: {} at {}px, charset {}", font.font, font.size, font.charset);
    }
    if let Some(font) = &asset.embedded_font {
        println!(
            "embedded font: {}px, {} glyphs, {}x{} atlas, {} bytes{}",
            font.base_size,
            font.glyphs.len(),
            font.image_width,
            font.image_height,
            font.payload.len(),
            if font.compressed { " (compressed)" } else { "" }
        );
    }
    Ok(())
}

fn print_icons(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let icons = parse_icons_binary(data)?;
    println!("{} icons of {}x{}", icons.len(), icons.size(), icons.size());
    for id in 0..icons.len() as u16 {
        if let Some(icon) = icons.get(id) {
            if !icon.name.is_empty() {
                println!("  {:>3} {}", id, icon.name);
            }
        }
    }
    Ok(())
}
