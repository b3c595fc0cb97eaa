use clap::Args;
use luckyrookie_core::ZodiacSign;

use super::CmdResult;

#[derive(Args)]
pub struct ZodiacArgs {
    /// Birth month (1-12)
    month: u32,
    /// Birth day (1-31)
    day: u32,
}

pub fn run(args: ZodiacArgs) -> CmdResult {
    let sign = ZodiacSign::from_month_day(args.month, args.day)?;
    println!("{sign}");
    Ok(())
}
