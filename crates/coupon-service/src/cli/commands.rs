//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。
//! `server` 启动 HTTP 服务，其余子命令直接在种子数据上执行一次操作并输出 JSON。

use clap::{Parser, Subcommand};

/// 合作门店优惠券服务命令行工具
#[derive(Parser, Debug)]
#[command(name = "coupon-server")]
#[command(version, about = "合作门店优惠券核销服务")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，未指定时使用配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 HTTP REST API 服务
    Server {
        /// 服务端口，覆盖配置
        #[arg(short, long)]
        port: Option<u16>,

        /// 不填充种子数据，以空集合启动
        #[arg(long)]
        no_seed: bool,
    },

    /// 核验优惠券在指定门店是否可用
    Validate {
        /// 券码
        #[arg(short, long)]
        code: String,

        /// 门店令牌
        #[arg(short, long)]
        token: String,
    },

    /// 核验后在令牌对应的门店核销优惠券
    Redeem {
        /// 券码
        #[arg(short, long)]
        code: String,

        /// 门店令牌
        #[arg(short, long)]
        token: String,
    },

    /// 输出核销统计报表
    Analytics,

    /// 输出发放规则列表
    Rules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_server() {
        let cli = Cli::parse_from(["coupon-server", "server"]);
        assert!(cli.log_level.is_none());
        match cli.command {
            Commands::Server { port, no_seed } => {
                assert!(port.is_none());
                assert!(!no_seed);
            }
            _ => panic!("预期 Server 命令"),
        }

        let cli = Cli::parse_from([
            "coupon-server",
            "--log-level",
            "debug",
            "server",
            "-p",
            "9000",
            "--no-seed",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Server { port, no_seed } => {
                assert_eq!(port, Some(9000));
                assert!(no_seed);
            }
            _ => panic!("预期 Server 命令"),
        }
    }

    #[test]
    fn test_cli_parse_validate_and_redeem() {
        let cli = Cli::parse_from([
            "coupon-server",
            "validate",
            "--code",
            "WELCOME25",
            "--token",
            "PATINHAS001",
        ]);
        match cli.command {
            Commands::Validate { code, token } => {
                assert_eq!(code, "WELCOME25");
                assert_eq!(token, "PATINHAS001");
            }
            _ => panic!("预期 Validate 命令"),
        }

        let cli = Cli::parse_from(["coupon-server", "redeem", "-c", "LOYAL10", "-t", "ANIMAL002"]);
        assert!(matches!(cli.command, Commands::Redeem { .. }));
    }

    #[test]
    fn test_cli_parse_reports() {
        let cli = Cli::parse_from(["coupon-server", "analytics"]);
        assert!(matches!(cli.command, Commands::Analytics));

        let cli = Cli::parse_from(["coupon-server", "rules"]);
        assert!(matches!(cli.command, Commands::Rules));
    }

    #[test]
    fn test_cli_requires_token() {
        let result = Cli::try_parse_from(["coupon-server", "validate", "--code", "WELCOME25"]);
        assert!(result.is_err());
    }
}
