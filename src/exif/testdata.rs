//! Hand-built images for tests.

/// A minimal JPEG whose IFD0 holds `Make = "Canon"` and `Model = "Canon EOS 40D"`.
///
/// Layout: SOI, APP1 (`Exif\0\0` + little-endian TIFF), SOS with zero-filled scan
/// data, EOI. The decoder wants some scan data after the APP1 segment.
pub(crate) fn canon_jpeg() -> Vec<u8> {
    let make = b"Canon\0";
    let model = b"Canon EOS 40D\0";

    // TIFF header, then IFD0 at offset 8 with two entries and no next IFD.
    let ifd_len = 2 + 2 * 12 + 4;
    let make_offset = 8 + ifd_len as u32;
    let model_offset = make_offset + make.len() as u32;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    for (tag, value, offset) in [(0x010Fu16, &make[..], make_offset), (0x0110, &model[..], model_offset)] {
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
        tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
        tiff.extend_from_slice(&offset.to_le_bytes());
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(make);
    tiff.extend_from_slice(model);

    let mut jpeg = vec![0xFF, 0xD8];

    let app1_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&[0xFF, 0xE1]);
    jpeg.extend_from_slice(&app1_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);

    // SOS: one component, table 0, spectral 0..63.
    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    jpeg.extend(std::iter::repeat_n(0u8, 8 * 1024));

    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
