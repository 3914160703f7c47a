use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
     ____  _____ _        _ __   ______ _____ _   _
    |  _ \| ____| |      / \\ \ / / ___| ____| \ | |
    | |_) |  _| | |     / _ \\ V / |  _|  _| |  \| |
    |  _ <| |___| |___ / ___ \| || |_| | |___| |\  |
    |_| \_\_____|_____/_/   \_\_| \____|_____|_| \_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
}
