use anyhow::{anyhow, Context, Result};
use bufint::{divide, OwnedBbi};

/// Text form of operands and results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Op {
    pub fn parse(op: &str) -> Result<Self> {
        match op {
            "+" => Ok(Op::Add),
            "-" => Ok(Op::Sub),
            "*" | "x" => Ok(Op::Mul),
            "/" => Ok(Op::Div),
            "%" => Ok(Op::Rem),
            _ => Err(anyhow!("operator not supported: '{}'", op)),
        }
    }
}

pub fn calc_command(a: &str, op: &str, b: &str, radix: Radix, width: usize) -> Result<()> {
    let lines = evaluate(a, op, b, radix, width)?;
    print!("{}", render(&lines));
    Ok(())
}

/// Compute `a op b` in `width`-byte buffers and return the three output
/// lines: both operands as parsed, then the result.
pub fn evaluate(a: &str, op: &str, b: &str, radix: Radix, width: usize) -> Result<[String; 3]> {
    let op = Op::parse(op)?;
    let lhs = load(a, radix, width).with_context(|| format!("bad operand '{}'", a))?;
    let rhs = load(b, radix, width).with_context(|| format!("bad operand '{}'", b))?;
    log::debug!("{:?} {:?} {:?}", lhs, op, rhs);

    let mut result = OwnedBbi::with_capacity(width);
    match op {
        Op::Add => result.add(&lhs, &rhs),
        Op::Sub => result.subtract(&lhs, &rhs),
        Op::Mul => result.multiply(&lhs, &rhs),
        Op::Div | Op::Rem => {
            let mut other = OwnedBbi::with_capacity(width);
            if op == Op::Div {
                divide(&mut result, &mut other, &lhs, &rhs)
            } else {
                divide(&mut other, &mut result, &lhs, &rhs)
            }
        }
    }
    .with_context(|| format!("{:?} failed", op))?;

    Ok([
        store(&lhs, radix)?,
        store(&rhs, radix)?,
        store(&result, radix)?,
    ])
}

/// Right-align the lines on a common width, one per output line.
pub fn render(lines: &[String]) -> String {
    let w = lines.iter().map(String::len).max().unwrap_or(0);
    lines.iter().map(|l| format!("{:>w$}\n", l, w = w)).collect()
}

fn load(text: &str, radix: Radix, width: usize) -> Result<OwnedBbi> {
    let mut n = OwnedBbi::with_capacity(width);
    match radix {
        Radix::Decimal => n.load_from_decimal(text)?,
        Radix::Hex => n.load_from_hex(text)?,
    }
    Ok(n)
}

fn store(n: &OwnedBbi, radix: Radix) -> Result<String> {
    // Three decimal digits per byte always suffice.
    let mut out = vec![0u8; n.used() * 3 + 3];
    let len = match radix {
        Radix::Decimal => n.store_to_decimal(&mut out)?,
        Radix::Hex => n.store_to_hex(&mut out)?,
    };
    out.truncate(len);
    Ok(String::from_utf8(out)?)
}
