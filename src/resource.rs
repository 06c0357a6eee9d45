use crate::router::Vars;

use std::fs::File;
use std::io;
use std::path::Path;

/// Renders a static resource that the router has already located on disk.
pub trait Render {
    fn render(&self, path: &Path, vars: &Vars<'_>) -> io::Result<()>;
}

impl<F> Render for F
where
    F: Fn(&Path, &Vars<'_>) -> io::Result<()>,
{
    fn render(&self, path: &Path, vars: &Vars<'_>) -> io::Result<()> {
        (self)(path, vars)
    }
}

pub type BoxRender = Box<dyn Render + Send + Sync>;

/// Copies the file to standard output verbatim. Captured variables are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServeFile;

impl Render for ServeFile {
    fn render(&self, path: &Path, _: &Vars<'_>) -> io::Result<()> {
        let mut file = File::open(path)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        io::copy(&mut file, &mut out)?;
        Ok(())
    }
}
