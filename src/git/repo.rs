use crate::error::{Result, WrappedError};
use crate::parse::log_format;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Filters forwarded to `git log`.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub year: Option<i32>,
    pub author: Option<String>,
}

impl LogQuery {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            log_format(),
            "--numstat".to_string(),
            "--no-merges".to_string(),
        ];
        if let Some(year) = self.year {
            args.push(format!("--after={year}-01-01"));
            args.push(format!("--before={}-01-01", year + 1));
        }
        if let Some(author) = &self.author {
            args.push("--author".to_string());
            args.push(author.clone());
        }
        args
    }
}

pub struct GitRepo {
    repo: gix::Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = gix::discover(&repo_path).map_err(|e| match e {
            gix::discover::Error::Discover(_) => WrappedError::NotARepository(repo_path.clone()),
            other => other.into(),
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name: the `origin` remote's last path segment, else the work-tree directory name.
    pub fn name(&self) -> String {
        let config = self.repo.config_snapshot();
        if let Some(name) = config
            .string("remote.origin.url")
            .and_then(|url| repo_name_from_url(&url.to_string()))
        {
            return name;
        }

        warn!(path = %self.path.display(), "no usable origin remote, naming repository after its directory");
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Run `git log` for `query` and return its stdout, killing git after `timeout`.
    pub fn capture_log(&self, query: &LogQuery, timeout: Duration, progress: bool) -> Result<String> {
        let args = query.args();
        info!(path = %self.path.display(), ?args, "capturing git log");

        let pb = if progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Reading commit history...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let result = run_git(&self.path, &args, timeout);
        pb.finish_and_clear();
        result
    }
}

fn run_git(cwd: &Path, args: &[String], timeout: Duration) -> Result<String> {
    let mut child = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WrappedError::GitNotInstalled,
            _ => WrappedError::Io(e),
        })?;

    // git stalls once either pipe buffer fills
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait_with_deadline(&mut child, timeout)?;

    let stdout = join(stdout)?;
    let stderr = join(stderr)?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        if stderr.contains("not a git repository") {
            return Err(WrappedError::NotARepository(cwd.to_path_buf()));
        }
        return Err(WrappedError::Git(stderr));
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(WrappedError::GitTimeout(timeout.into()));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

type Drain = Option<thread::JoinHandle<io::Result<Vec<u8>>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join(handle: Drain) -> Result<Vec<u8>> {
    match handle {
        Some(h) => h
            .join()
            .map_err(|_| WrappedError::Git("output reader thread panicked".to_string()))?
            .map_err(WrappedError::from),
        None => Ok(Vec::new()),
    }
}

/// `git@github.com:user/project.git` and `https://host/user/project` both give `project`.
fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| name.to_string())
}
