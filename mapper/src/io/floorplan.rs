use anyhow::Context;
use std::path::Path;

/// Grid shape for a floorplan image as `(height, width)`, read from the
/// image header without decoding pixels.
pub fn floorplan_shape<P: AsRef<Path>>(path: P) -> anyhow::Result<(usize, usize)> {
    let path_ref = path.as_ref();
    let (width, height) = image::image_dimensions(path_ref)
        .with_context(|| format!("reading floorplan {}", path_ref.display()))?;
    Ok((height as usize, width as usize))
}
