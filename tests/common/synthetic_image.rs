/// Generates a grayscale image with a single vertical step edge: zeros on
/// the left, full white from `col` onward.
pub fn step_edge_u8(width: usize, height: usize, col: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(col < width, "step column must lie inside the image");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in col..width {
            img[y * width + x] = 255;
        }
    }
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Generates a bright one-pixel horizontal line on a black background.
pub fn bright_line_u8(width: usize, height: usize, row: usize) -> Vec<u8> {
    assert!(row < height, "line row must lie inside the image");

    let mut img = vec![0u8; width * height];
    for x in 0..width {
        img[row * width + x] = 255;
    }
    img
}
