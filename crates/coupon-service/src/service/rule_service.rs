//! 发放规则管理服务

use std::sync::Arc;

use tracing::{info, instrument};

use coupon_shared::observability::metrics;

use crate::error::{CouponError, Result};
use crate::models::{CouponRule, NewCouponRule};
use crate::repository::RuleRepositoryTrait;

/// 折扣百分比允许范围
pub const DISCOUNT_RANGE: std::ops::RangeInclusive<u8> = 1..=100;

/// 规整并校验待创建规则
fn sanitize(mut rule: NewCouponRule) -> Result<NewCouponRule> {
    rule.name = rule.name.trim().to_string();
    rule.description = rule.description.trim().to_string();

    if rule.name.is_empty() {
        return Err(CouponError::Validation("Nome da regra é obrigatório".to_string()));
    }
    if rule.description.is_empty() {
        return Err(CouponError::Validation("Descrição da regra é obrigatória".to_string()));
    }
    if !DISCOUNT_RANGE.contains(&rule.discount) {
        return Err(CouponError::Validation(format!(
            "O desconto deve estar entre {} e {}: {}",
            DISCOUNT_RANGE.start(),
            DISCOUNT_RANGE.end(),
            rule.discount
        )));
    }
    Ok(rule)
}

/// 规则管理服务
pub struct RuleService<RR>
where
    RR: RuleRepositoryTrait,
{
    rule_repo: Arc<RR>,
}

impl<RR> RuleService<RR>
where
    RR: RuleRepositoryTrait,
{
    pub fn new(rule_repo: Arc<RR>) -> Self {
        Self { rule_repo }
    }

    pub async fn list_rules(&self) -> Result<Vec<CouponRule>> {
        self.rule_repo.list_rules().await
    }

    pub async fn get_rule(&self, id: &str) -> Result<CouponRule> {
        self.rule_repo
            .get_rule(id)
            .await?
            .ok_or_else(|| CouponError::RuleNotFound(id.to_string()))
    }

    #[instrument(skip(self, rule), fields(name = %rule.name))]
    pub async fn create_rule(&self, rule: NewCouponRule) -> Result<CouponRule> {
        let rule = sanitize(rule)?;
        let created = self.rule_repo.create_rule(rule).await?;

        metrics::record_rule_change("create");
        info!(rule_id = %created.id, is_active = created.is_active, "规则已创建");
        Ok(created)
    }

    /// 切换规则启用状态
    #[instrument(skip(self))]
    pub async fn toggle_rule(&self, id: &str) -> Result<CouponRule> {
        let rule = self
            .rule_repo
            .update_rule(id, Box::new(|rule| rule.is_active = !rule.is_active))
            .await?;

        metrics::record_rule_change("toggle");
        info!(rule_id = %rule.id, is_active = rule.is_active, "规则状态已切换");
        Ok(rule)
    }
}
