use clap::Parser;

#[derive(Parser)]
#[command(name = "bufcalc")]
#[command(about = "Fixed-width big integer calculator", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Left operand (decimal, or hex with --hex)
    pub a: String,
    /// Operator: + - * / %
    pub op: String,
    /// Right operand
    pub b: String,
    /// Read operands and print results as hex
    #[arg(long)]
    pub hex: bool,
    /// Capacity of every operand buffer, in bytes
    #[arg(long, default_value_t = 64)]
    pub width: usize,
    /// Log failures from the integer core to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
