//! 优惠券服务错误类型
//!
//! 所有失败都是可由操作员纠正的输入问题，以结构化结果返回，不做重试。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 优惠券服务错误类型
#[derive(Debug, Error)]
pub enum CouponError {
    // === 资源不存在 ===
    // 消息直接展示给门店操作员；令牌属于门店凭据，不回显
    #[error("Token de loja inválido")]
    StoreNotFound(String),

    #[error("Cupom não encontrado: {0}")]
    CouponNotFound(String),

    #[error("Regra não encontrada: {0}")]
    RuleNotFound(String),

    // === 优惠券状态 ===
    #[error("Este cupom já foi utilizado")]
    AlreadyUsed { code: String },

    #[error("Este cupom está expirado")]
    Expired { code: String },

    // === 输入校验 ===
    #[error("{0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 优惠券服务 Result 类型别名
pub type Result<T> = std::result::Result<T, CouponError>;

impl CouponError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::StoreNotFound(_) | Self::CouponNotFound(_) | Self::RuleNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyUsed { .. } => StatusCode::CONFLICT,
            Self::Expired { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误码（用于 API 响应与指标标签）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StoreNotFound(_) => "STORE_NOT_FOUND",
            Self::CouponNotFound(_) => "COUPON_NOT_FOUND",
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::AlreadyUsed { .. } => "COUPON_ALREADY_USED",
            Self::Expired { .. } => "COUPON_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Erro interno, tente novamente mais tarde".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for CouponError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
