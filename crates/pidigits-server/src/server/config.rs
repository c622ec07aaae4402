use anyhow::bail;
use clap::{Parser, ValueEnum};
use pidigits::MAX_DIGITS;

/// How much of the underlying failure a 400 response reveals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ErrorDetail {
    /// Echo the validation or provider message as-is.
    #[default]
    Verbatim,
    /// Replace every client error with a fixed message naming the valid range.
    Generic,
}

/// Runtime configuration for the `pidigits-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pidigits-server",
    version,
    about = "An HTTP service that returns decimal digits of pi"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix
    /// socket).
    ///
    /// Example: "0.0.0.0:8000" or "/tmp/pidigits.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8000"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a
    /// file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Exclusive upper bound for the `digits` and `limit` query parameters.
    ///
    /// Lowering it caps how much work a single request can ask for. It can
    /// never exceed `ceil((2^32 - 1) / 4)`.
    ///
    /// Environment variable: `MAX_DIGITS`
    #[arg(long, env = "MAX_DIGITS", default_value_t = MAX_DIGITS)]
    pub max_digits: u32,

    /// Body of 400 responses: `verbatim` echoes the underlying message,
    /// `generic` returns a fixed message naming the valid range.
    ///
    /// Environment variable: `ERROR_DETAIL`
    #[arg(long, env = "ERROR_DETAIL", value_enum, default_value_t = ErrorDetail::Verbatim)]
    pub error_detail: ErrorDetail,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub max_digits: u32,
    pub error_detail: ErrorDetail,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: String::from("0.0.0.0:8000"),
            uds: false,
            max_digits: MAX_DIGITS,
            error_detail: ErrorDetail::Verbatim,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.max_digits == 0 {
            bail!("MAX_DIGITS must be greater than 0");
        }

        if args.max_digits > MAX_DIGITS {
            bail!(
                "MAX_DIGITS ({}) exceeds the largest representable precision (max = {})",
                args.max_digits,
                MAX_DIGITS
            );
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            max_digits: args.max_digits,
            error_detail: args.error_detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let argv = core::iter::once("pidigits-server").chain(args.iter().copied());
        let args = CliArgs::try_parse_from(argv)?;
        ServerConfig::try_from(args)
    }

    #[test]
    fn explicit_flags_are_applied() -> anyhow::Result<()> {
        let config = parse(&[
            "--server-addr",
            "127.0.0.1:9000",
            "--max-digits",
            "1000",
            "--error-detail",
            "generic",
        ])?;
        assert_eq!(config.server_addr, "127.0.0.1:9000");
        assert_eq!(config.max_digits, 1000);
        assert_eq!(config.error_detail, ErrorDetail::Generic);
        assert!(!config.uds);
        Ok(())
    }

    #[test]
    fn max_digits_upper_bound_is_accepted() -> anyhow::Result<()> {
        let config = parse(&["--max-digits", &MAX_DIGITS.to_string()])?;
        assert_eq!(config.max_digits, MAX_DIGITS);
        Ok(())
    }

    #[test]
    fn zero_max_digits_is_rejected() {
        let err = parse(&["--max-digits", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"), "{err}");
    }

    #[test]
    fn max_digits_above_limit_is_rejected() {
        let err = parse(&["--max-digits", &(MAX_DIGITS + 1).to_string()]).unwrap_err();
        assert!(err.to_string().contains("exceeds"), "{err}");
    }

    #[test]
    fn unknown_error_detail_is_rejected() {
        assert!(parse(&["--error-detail", "chatty"]).is_err());
    }
}
