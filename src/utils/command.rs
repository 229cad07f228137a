use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Run a command, capture stdout, kill it if it exceeds the timeout.
/// Returns None on spawn failure, timeout, or non-zero exit.
pub fn run_command_with_timeout(command: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    let stdout = child.stdout.take()?;
    let rx = drain_stdout(stdout);
    let success = wait_with_timeout(&mut child, timeout)?;

    let output = rx.recv().ok()?;
    if success { Some(output) } else { None }
}

/// Same as run_command_with_timeout, but feeds `input` to the child's stdin
/// before collecting stdout. Used for filter-style tools.
pub fn run_command_with_input(
    command: &str,
    args: &[&str],
    input: &str,
    timeout: Duration,
) -> Option<String> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    let stdin = child.stdin.take()?;
    let stdout = child.stdout.take()?;

    // Writer runs on its own thread so a child that fills its stdout pipe
    // before reading all of stdin cannot deadlock us.
    let payload = input.to_string();
    thread::spawn(move || {
        let mut stdin = stdin;
        let _ = stdin.write_all(payload.as_bytes());
    });
    let rx = drain_stdout(stdout);
    let success = wait_with_timeout(&mut child, timeout)?;

    let output = rx.recv().ok()?;
    if success { Some(output) } else { None }
}

fn drain_stdout(stdout: std::process::ChildStdout) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut reader = io::BufReader::new(stdout);
        let mut output = String::new();
        let _ = reader.read_to_string(&mut output);
        let _ = tx.send(output);
    });
    rx
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<bool> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status.success()),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Some(false);
                }
            }
            Err(_) => return None,
        }
        thread::sleep(Duration::from_millis(10));
    }
}
