//! Interactive line-oriented front end
//!
//! Reads commands from any `BufRead`, hands them to a [`Dispatcher`] under
//! the current channel key, and carries out the reply actions: attached map
//! images are written to disk and `clear` deletes the channel's image.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::command::{Dispatcher, MapImage, Reply, ReplyAction, ReplyStatus};
use crate::output::{map_image_path, remove_map_image, save_png};

/// Channel key used when none is given
pub const DEFAULT_CHANNEL: &str = "repl";

const PROMPT: &str = ">>";
const RESULT_HEADER: &str = "=>";

/// An interactive session bound to one channel at a time.
pub struct Repl {
    dispatcher: Dispatcher,
    image_dir: PathBuf,
    channel: String,
    use_colors: bool,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            dispatcher,
            image_dir: image_dir.into(),
            channel: DEFAULT_CHANNEL.to_string(),
            use_colors: false,
        }
    }

    /// Start on `channel` instead of [`DEFAULT_CHANNEL`].
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Enable or disable ANSI colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run until `q`, `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.write_welcome(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{} ", self.color(PROMPT, "\x1b[33m"))?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            if !self.handle_line(&line?, out)? {
                break;
            }
        }

        tracing::debug!(channel = %self.channel, "repl session ended");
        Ok(())
    }

    /// Handle one input line. Returns `false` when the session should end.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line == "q" {
            return Ok(false);
        }

        let Some(reply) = self.dispatcher.dispatch(&self.channel, line) else {
            return Ok(true);
        };
        self.handle_reply(reply, out)
    }

    fn handle_reply<W: Write>(&mut self, reply: Reply, out: &mut W) -> io::Result<bool> {
        if reply.status != ReplyStatus::Ok {
            return self.write_error(out, &reply.text).map(|_| true);
        }

        if !reply.text.is_empty() {
            for line in reply.text.lines() {
                self.write_result(out, line)?;
            }
        }

        if let Some(e) = &reply.render_error {
            self.write_error(out, e)?;
        }

        if let Some(image) = &reply.image {
            match self.save_image(image) {
                Ok(path) => self.write_result(out, &format!("saved {}", path.display()))?,
                Err(e) => self.write_error(out, &format!("png: {}", e))?,
            }
        } else if reply.text.is_empty() && reply.action.is_none() && reply.render_error.is_none() {
            self.write_result(out, "OK")?;
        }

        match reply.action {
            Some(ReplyAction::RemoveImage) => {
                if let Err(e) = remove_map_image(&self.image_dir, &self.channel) {
                    self.write_error(out, &format!("clear: {}", e))?;
                }
            }
            Some(ReplyAction::SwitchChannel(channel)) => {
                tracing::debug!(from = %self.channel, to = %channel, "switched channel");
                self.channel = channel;
            }
            Some(ReplyAction::Quit) => return Ok(false),
            None => {}
        }

        Ok(true)
    }

    /// Where an attached image goes: the requested file, else the
    /// channel's image in the image directory.
    fn image_path(&self, image: &MapImage) -> PathBuf {
        match &image.file {
            Some(file) => file.clone(),
            None => map_image_path(&self.image_dir, &self.channel),
        }
    }

    fn save_image(&self, image: &MapImage) -> Result<PathBuf, crate::output::OutputError> {
        let path = self.image_path(image);
        save_png(&image.image, &path)?;
        Ok(path)
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    fn write_welcome<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.color("mapbot REPL", "\x1b[1m"))?;
        writeln!(out)?;
        writeln!(out, "* Type \"help\" to list the available commands")?;
        writeln!(out, "* Type \"q\" or \"quit\" to exit")?;
        writeln!(out, "* Channel: {}", self.channel)?;
        writeln!(out)
    }

    fn write_result<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        writeln!(out, "{} {}", self.color(RESULT_HEADER, "\x1b[36m"), text)
    }

    fn write_error<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        for line in text.lines() {
            writeln!(out, "{}", self.color(line, "\x1b[31m"))?;
        }
        Ok(())
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }
}

impl std::fmt::Debug for Repl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repl")
            .field("image_dir", &self.image_dir)
            .field("channel", &self.channel)
            .field("use_colors", &self.use_colors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandTable;
    use crate::font::FontCache;
    use crate::registry::MapRegistry;
    use crate::renderer::MapRenderer;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn repl_with(image_dir: &Path, fonts: FontCache) -> Repl {
        let dispatcher =
            Dispatcher::new(Arc::new(MapRegistry::new()), Arc::new(fonts), MapRenderer::default(), CommandTable::new());
        Repl::new(dispatcher, image_dir)
    }

    fn repl(image_dir: &Path) -> Repl {
        let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf");
        repl_with(image_dir, FontCache::from_file(&font).expect("should load bundled font"))
    }

    fn run_session(repl: &mut Repl, input: &str) -> String {
        let mut out = Vec::new();
        repl.run(input.as_bytes(), &mut out).expect("should run session");
        String::from_utf8(out).expect("output should be utf-8")
    }

    #[test]
    fn test_session_saves_channel_image() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path());

        let output = run_session(&mut repl, "init 4 x 3\naddc \"hero\" (2, 2)\nlsc\nq\n");

        assert!(output.contains("=> SquareMap (4 x 3)"));
        assert!(output.contains("=> hero (2, 2)"));
        assert!(!output.contains("\x1b["));

        let path = temp.path().join("repl.png");
        let image = image::open(&path).expect("should write channel image").to_rgba8();
        assert_eq!(image.dimensions(), (128, 96 + 32));
    }

    #[test]
    fn test_errors_and_usage() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path());

        let output = run_session(&mut repl, "size\ninit big\nbogus\n");

        assert!(output.contains("map not created\n"));
        assert!(output.contains("usage: init WIDTH x HEIGHT\n"));
        assert!(output.contains("invalid command: bogus\n"));
    }

    #[test]
    fn test_render_failure_after_mutation() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl_with(temp.path(), FontCache::new());

        let output = run_session(&mut repl, "init 3 x 3\naddc \"A\" (1, 1)\nlsc\n");

        assert!(output.contains("=> SquareMap (3 x 3)\ninit: font not loaded: normal\n"));
        assert!(output.contains("=> A (1, 1)\naddc: font not loaded: normal\n"));
        assert!(!output.contains("=> OK"));
        assert!(!output.contains("already exists"));
        assert!(!temp.path().join("repl.png").exists());
    }

    #[test]
    fn test_clear_removes_image() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path());

        run_session(&mut repl, "init 3 x 3\n");
        assert!(temp.path().join("repl.png").exists());

        run_session(&mut repl, "clear\n");
        assert!(!temp.path().join("repl.png").exists());
    }

    #[test]
    fn test_png_to_named_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path());
        let target = temp.path().join("out").join("custom.png");

        let output = run_session(&mut repl, &format!("init 3 x 3\npng {}\n", target.display()));
        assert!(target.exists());
        assert!(output.contains(&format!("=> saved {}", target.display())));
    }

    #[test]
    fn test_use_switches_channel() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path()).with_channel("table-1");

        run_session(&mut repl, "init 3 x 3\nuse table-2\ninit 5 x 5\nsize\n");

        assert_eq!(repl.channel(), "table-2");
        assert!(temp.path().join("table-1.png").exists());
        assert!(temp.path().join("table-2.png").exists());
        assert_eq!(repl.dispatcher().registry().keys(), vec!["table-1", "table-2"]);
    }

    #[test]
    fn test_quit_stops_reading() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path());

        let output = run_session(&mut repl, "quit\ninit 3 x 3\n");
        assert!(!output.contains("SquareMap"));
        assert!(repl.dispatcher().registry().is_empty());
    }

    #[test]
    fn test_colors() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut repl = repl(temp.path()).with_colors(true);

        let output = run_session(&mut repl, "size\n");
        assert!(output.contains("\x1b[31mmap not created\x1b[0m"));
        assert!(output.contains("\x1b[33m>>\x1b[0m "));
    }
}
