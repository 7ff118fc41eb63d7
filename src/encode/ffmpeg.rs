use std::ffi::OsString;
use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig, check_frame_order};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::raster::FrameRGBA;

/// Options for [`FfmpegSink`] video output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Flatten straight alpha over this color before encoding. `None` passes bytes through.
    pub bg_rgba: Option<[u8; 4]>,
    /// Encoder program name or path.
    pub program: PathBuf,
}

impl FfmpegSinkOpts {
    /// Create options for writing a video to `out_path` with the system `ffmpeg`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: None,
            program: PathBuf::from("ffmpeg"),
        }
    }
}

/// Sink that spawns `ffmpeg` and streams raw RGBA frames into its stdin.
///
/// Input is declared as `rawvideo`/`rgba` at the sink's size and frame rate; output is H.264 in
/// `yuv420p`, which requires even dimensions.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink; the encoder is spawned in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }
}

/// Validate a sink configuration against the encoder's input contract.
pub fn validate_encode_config(cfg: &SinkConfig) -> InkwarpResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(InkwarpError::configuration("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(InkwarpError::configuration(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(InkwarpError::configuration(format!(
            "ffmpeg sink width/height must be even (required for yuv420p output), got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// Arguments passed to `ffmpeg` for a sweep of the given configuration.
pub fn ffmpeg_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push(if opts.overwrite { "-y" } else { "-n" }.into());
    for a in [
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-vcodec",
        "rawvideo",
        "-s",
    ] {
        args.push(a.into());
    }
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    for a in ["-pix_fmt", "rgba", "-r"] {
        args.push(a.into());
    }
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den).into());
    for a in [
        "-i",
        "-",
        "-an",
        "-vcodec",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ] {
        args.push(a.into());
    }
    args.push(opts.out_path.clone().into_os_string());
    args
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> InkwarpResult<()> {
        validate_encode_config(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(InkwarpError::configuration(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_program_on_path(&self.opts.program) {
            return Err(InkwarpError::io(format!(
                "'{}' is required for video encoding, but was not found on PATH",
                self.opts.program.display()
            )));
        }

        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(ffmpeg_args(&cfg, &self.opts));

        let mut child = cmd.spawn().map_err(|e| {
            InkwarpError::io(format!(
                "failed to spawn '{}': {e}",
                self.opts.program.display()
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| InkwarpError::io("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| InkwarpError::io("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "spawned ffmpeg"
        );

        self.scratch = vec![0u8; cfg.frame_len()];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> InkwarpResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| InkwarpError::io("ffmpeg sink not started"))?;
        check_frame_order(self.last_idx, idx)?;
        cfg.check_frame(frame)?;
        self.last_idx = Some(idx);

        let bytes: &[u8] = match self.opts.bg_rgba {
            Some(bg) => {
                flatten_straight_over_bg(&mut self.scratch, &frame.data, bg)?;
                &self.scratch
            }
            None => &frame.data,
        };

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(InkwarpError::io("ffmpeg sink is already finalized"));
        };
        stdin.write_all(bytes).map_err(|e| {
            InkwarpError::io(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> InkwarpResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| InkwarpError::io("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| InkwarpError::io(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| InkwarpError::io("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| InkwarpError::io(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(InkwarpError::io(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // A sweep that aborted mid-stream never reaches `end`; don't leave the encoder running.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn flatten_straight_over_bg(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> InkwarpResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(InkwarpError::precondition(
            "flatten_straight_over_bg expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let r = mul_div255_u16(s[0] as u16, a) + mul_div255_u16(bg_r, inv);
        let g = mul_div255_u16(s[1] as u16, a) + mul_div255_u16(bg_g, inv);
        let b = mul_div255_u16(s[2] as u16, a) + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> InkwarpResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            InkwarpError::io(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    is_program_on_path(Path::new("ffmpeg"))
}

fn is_program_on_path(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
