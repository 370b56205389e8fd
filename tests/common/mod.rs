use png::{BitDepth, ColorType, Decoder};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub fn get_scratch_path(test_name: &str, file_name: &str) -> PathBuf {
    let mut scratch_path = env::temp_dir();
    scratch_path.push(format!("rgbpng-{}-{}", test_name, std::process::id()));
    fs::create_dir_all(&scratch_path).unwrap();
    scratch_path.push(file_name);

    let _ = fs::remove_file(&scratch_path);
    scratch_path
}

pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

pub fn decode_png(path: &Path) -> DecodedPng {
    let decoder = Decoder::new(File::open(path).unwrap());
    let mut reader = decoder.read_info().unwrap();
    assert!(!reader.info().interlaced);

    let mut raw_pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw_pixels).unwrap();
    assert_eq!(info.color_type, ColorType::Rgba);
    assert_eq!(info.bit_depth, BitDepth::Eight);
    raw_pixels.truncate(info.buffer_size());

    DecodedPng {
        width: info.width,
        height: info.height,
        pixels: raw_pixels
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect(),
    }
}
