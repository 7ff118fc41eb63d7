use super::*;
use crate::foundation::core::Fps;

fn frame(fill: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![fill; 8],
    }
}

#[test]
fn frames_are_concatenated_verbatim() {
    let mut sink = RawStreamSink::new(Vec::new());
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::SWEEP_DEFAULT,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame(7)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(9)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.frames_written(), 2);
    let bytes = sink.into_inner();
    assert_eq!(bytes.len(), 16);
    assert!(bytes[..8].iter().all(|&b| b == 7));
    assert!(bytes[8..].iter().all(|&b| b == 9));
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "reader went away",
        ))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn broken_writer_surfaces_io_failure() {
    let mut sink = RawStreamSink::new(ClosedPipe);
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::SWEEP_DEFAULT,
    })
    .unwrap();
    let err = sink.push_frame(FrameIndex(0), &frame(1)).unwrap_err();
    assert!(err.is_io());
    assert_eq!(sink.frames_written(), 0);
}

#[test]
fn out_of_order_frames_are_rejected_without_writing() {
    let mut sink = RawStreamSink::new(Vec::new());
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::SWEEP_DEFAULT,
    })
    .unwrap();
    sink.push_frame(FrameIndex(5), &frame(1)).unwrap();
    assert!(sink.push_frame(FrameIndex(2), &frame(2)).unwrap_err().is_io());
    assert!(sink.push_frame(FrameIndex(5), &frame(3)).unwrap_err().is_io());
    sink.push_frame(FrameIndex(6), &frame(4)).unwrap();

    assert_eq!(sink.frames_written(), 2);
    let bytes = sink.into_inner();
    assert_eq!(bytes.len(), 16);
    assert!(bytes[8..].iter().all(|&b| b == 4));
}

#[test]
fn begin_resets_frame_order() {
    let mut sink = RawStreamSink::new(Vec::new());
    let cfg = SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::SWEEP_DEFAULT,
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(9), &frame(1)).unwrap();
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
}
