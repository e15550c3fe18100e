use std::io::{self, Write};

const BANNER: &str = r"
   _____       __    ____         __
  / ___/__  __/ /_  / __ \____  _____/ /__
  \__ \/ / / / __ \/ /_/ / __ \/ ___/ //_/
 ___/ / /_/ / /_/ / _, _/ /_/ / /__/ ,<
/____/\__,_/_.___/_/ |_|\____/\___/_/|_|

    A URL scraper for Cavalier
";

pub fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", BANNER)
}
