use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::frame::TrackingFrame;

/// Magic bytes at the start of every frame log.
const FRAME_LOG_MAGIC: [u8; 4] = *b"APFL";

/// Current frame log format version.
const FRAME_LOG_VERSION: u16 = 1;

/// Error types for the frame log module.
#[derive(Debug, thiserror::Error)]
pub enum FrameLogError {
    /// Failed to read or write the frame log
    #[error("Failed to read or write the frame log")]
    Io(#[from] std::io::Error),

    /// Failed to decode a frame record
    #[error("Failed to decode a frame record")]
    Decode(#[from] bincode::error::DecodeError),

    /// Failed to encode a frame record
    #[error("Failed to encode a frame record")]
    Encode(#[from] bincode::error::EncodeError),

    /// The file is not a frame log
    #[error("The file is not a frame log")]
    InvalidMagic,

    /// Unsupported frame log version
    #[error("Unsupported frame log version: {0}")]
    UnsupportedVersion(u16),
}

/// Writes tracking frames to a length-prefixed binary stream.
///
/// The format is a fixed header (magic bytes plus a version) followed by one
/// record per frame: a little-endian u32 payload length and the
/// bincode-encoded [`TrackingFrame`]. The stream is terminated by EOF, so a
/// recording interrupted between records replays cleanly up to that point.
pub struct FrameLogWriter<W: Write> {
    writer: W,
    num_frames: usize,
}

impl FrameLogWriter<BufWriter<File>> {
    /// Create a frame log file at the given path.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FrameLogError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> FrameLogWriter<W> {
    /// Start a frame log on the given writer, emitting the header.
    pub fn new(mut writer: W) -> Result<Self, FrameLogError> {
        writer.write_all(&FRAME_LOG_MAGIC)?;
        writer.write_all(&FRAME_LOG_VERSION.to_le_bytes())?;
        Ok(Self {
            writer,
            num_frames: 0,
        })
    }

    /// Append one frame to the log.
    pub fn write_frame(&mut self, frame: &TrackingFrame) -> Result<(), FrameLogError> {
        let payload = bincode::encode_to_vec(frame, bincode::config::standard())?;
        self.writer.write_all(&(payload.len() as u32).to_le_bytes())?;
        self.writer.write_all(&payload)?;
        self.num_frames += 1;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W, FrameLogError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Read all frames from a frame log stream.
pub fn read_frame_log<R: Read>(mut reader: R) -> Result<Vec<TrackingFrame>, FrameLogError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != FRAME_LOG_MAGIC {
        return Err(FrameLogError::InvalidMagic);
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let version = u16::from_le_bytes(version);
    if version != FRAME_LOG_VERSION {
        return Err(FrameLogError::UnsupportedVersion(version));
    }

    let mut frames = Vec::new();
    let mut len_buf = [0u8; 4];
    loop {
        match reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload)?;
        let (frame, _) = bincode::decode_from_slice(&payload, bincode::config::standard())?;
        frames.push(frame);
    }

    log::debug!("read {} frames from log", frames.len());
    Ok(frames)
}

/// Read all frames from a frame log file.
pub fn read_frame_log_file(path: impl AsRef<Path>) -> Result<Vec<TrackingFrame>, FrameLogError> {
    let file = File::open(path)?;
    read_frame_log(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CameraPose;
    use crate::status::TrackingStatus;
    use arpoints_cloud::pointcloud::FeatureCloud;

    fn sample_frames() -> Vec<TrackingFrame> {
        vec![
            TrackingFrame::new(
                FeatureCloud::new(vec![[0.0, 0.0, 1.0], [1.0, 2.0, 3.0]], Some(vec![3, 9])),
                CameraPose::from_position([0.0, 0.0, 0.0]),
                TrackingStatus::Normal,
                0.0,
            ),
            TrackingFrame::new(
                FeatureCloud::empty(),
                CameraPose::from_position([0.1, 0.0, -0.2]),
                TrackingStatus::Limited(crate::status::LimitedReason::ExcessiveMotion),
                0.033,
            ),
        ]
    }

    #[test]
    fn test_frame_log_roundtrip() -> Result<(), FrameLogError> {
        let frames = sample_frames();

        let mut writer = FrameLogWriter::new(Vec::new())?;
        for frame in &frames {
            writer.write_frame(frame)?;
        }
        assert_eq!(writer.num_frames(), 2);
        let buffer = writer.finish()?;

        let decoded = read_frame_log(&buffer[..])?;
        assert_eq!(decoded, frames);
        Ok(())
    }

    #[test]
    fn test_frame_log_rejects_bad_magic() {
        let buffer = b"NOPE\x01\x00".to_vec();
        assert!(matches!(
            read_frame_log(&buffer[..]),
            Err(FrameLogError::InvalidMagic)
        ));
    }

    #[test]
    fn test_frame_log_rejects_unknown_version() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&FRAME_LOG_MAGIC);
        buffer.extend_from_slice(&99u16.to_le_bytes());
        assert!(matches!(
            read_frame_log(&buffer[..]),
            Err(FrameLogError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_empty_log_has_no_frames() -> Result<(), FrameLogError> {
        let writer = FrameLogWriter::new(Vec::new())?;
        let buffer = writer.finish()?;
        let decoded = read_frame_log(&buffer[..])?;
        assert!(decoded.is_empty());
        Ok(())
    }
}
