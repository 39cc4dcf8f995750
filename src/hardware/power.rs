use std::io;
use std::process::Command;

pub trait PowerControl {
    fn power_off(&mut self) -> io::Result<()>;
}

/// Runs the configured shutdown command, `sudo poweroff` by default.
#[derive(Debug, Clone)]
pub struct CommandPower {
    program: String,
    args: Vec<String>,
}

impl CommandPower {
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl PowerControl for CommandPower {
    fn power_off(&mut self) -> io::Result<()> {
        tracing::info!(program = %self.program, args = ?self.args, "powering off");
        let status = Command::new(&self.program).args(&self.args).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("{} exited with {status}", self.program)))
        }
    }
}

/// Debug stand-in: records the request and returns.
#[derive(Debug, Clone, Default)]
pub struct LogOnlyPower;

impl PowerControl for LogOnlyPower {
    fn power_off(&mut self) -> io::Result<()> {
        tracing::info!("power-off requested (disabled)");
        Ok(())
    }
}
