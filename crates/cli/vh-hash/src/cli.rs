pub(crate) mod hash;
pub(crate) mod header;
pub(crate) mod input;

use crate::Error;

pub(crate) trait CliCommand {
    /// Run the command
    fn run(self) -> Result<(), Error>;
}
