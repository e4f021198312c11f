//! 种子数据
//!
//! 进程启动时填充的优惠券、合作门店和发放规则。
//! 所有时间相对启动时刻计算，保证演示数据中总有未过期和近期核销的优惠券。

use chrono::{DateTime, Duration, Utc};

use crate::models::{Coupon, CouponRule, CouponType, PartnerStore, TriggerType};

/// 启动目录：优惠券、门店、规则三个集合
#[derive(Debug, Clone, Default)]
pub struct SeedCatalog {
    pub coupons: Vec<Coupon>,
    pub stores: Vec<PartnerStore>,
    pub rules: Vec<CouponRule>,
}

impl SeedCatalog {
    /// 空目录（关闭种子数据时使用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 以 `now` 为基准生成默认目录
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            coupons: seed_coupons(now),
            stores: seed_stores(),
            rules: seed_rules(now),
        }
    }
}

fn days_from(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now + Duration::days(days)
}

/// 构造优惠券；`used` 为 (核销相对天数, 门店 ID)
#[allow(clippy::too_many_arguments)]
fn coupon(
    now: DateTime<Utc>,
    id: &str,
    code: &str,
    coupon_type: CouponType,
    discount: u8,
    description: &str,
    expires_in: i64,
    used: Option<(i64, &str)>,
    created_ago: i64,
) -> Coupon {
    Coupon {
        id: id.to_string(),
        code: code.to_string(),
        coupon_type,
        discount,
        description: description.to_string(),
        expires_at: days_from(now, expires_in),
        is_used: used.is_some(),
        used_at: used.map(|(days, _)| days_from(now, days)),
        used_by_store: used.map(|(_, store)| store.to_string()),
        created_at: days_from(now, -created_ago),
    }
}

fn seed_coupons(now: DateTime<Utc>) -> Vec<Coupon> {
    vec![
        coupon(
            now,
            "1",
            "WELCOME25",
            CouponType::FirstPurchase,
            25,
            "Cupom de primeira compra - 25% de desconto",
            30,
            None,
            5,
        ),
        coupon(
            now,
            "2",
            "BDAY2023",
            CouponType::Birthday,
            15,
            "Cupom de aniversário - 15% de desconto",
            10,
            Some((-2, "1")),
            10,
        ),
        coupon(
            now,
            "3",
            "LOYAL10",
            CouponType::Loyalty,
            10,
            "Cupom de fidelidade - 10% de desconto",
            60,
            None,
            15,
        ),
        coupon(
            now,
            "4",
            "SUMMER30",
            CouponType::SpecialPromotion,
            30,
            "Promoção especial de verão - 30% de desconto",
            45,
            Some((-1, "2")),
            8,
        ),
        coupon(
            now,
            "5",
            "FRIEND20",
            CouponType::Referral,
            20,
            "Indicação de amigo - 20% de desconto",
            20,
            None,
            3,
        ),
        coupon(
            now,
            "6",
            "SUMMER25",
            CouponType::SpecialPromotion,
            25,
            "Promoção especial de verão - 25% de desconto",
            25,
            Some((-4, "3")),
            12,
        ),
        coupon(
            now,
            "7",
            "WELCOME20",
            CouponType::FirstPurchase,
            20,
            "Cupom de primeira compra - 20% de desconto",
            30,
            Some((-7, "1")),
            20,
        ),
    ]
}

fn seed_stores() -> Vec<PartnerStore> {
    [
        ("1", "Pet Shop Patinhas", "PATINHAS001", "São Paulo, SP", 2),
        (
            "2",
            "Agropecuária Mundo Animal",
            "ANIMAL002",
            "Rio de Janeiro, RJ",
            1,
        ),
        ("3", "Casa dos Bichos", "BICHOS003", "Belo Horizonte, MG", 1),
        ("4", "Amigos Pet", "AMIGOS004", "Curitiba, PR", 0),
        (
            "5",
            "Clínica Veterinária Saúde Pet",
            "SAUDE005",
            "Brasília, DF",
            0,
        ),
    ]
    .into_iter()
    .map(|(id, name, token, location, coupons_redeemed)| PartnerStore {
        id: id.to_string(),
        name: name.to_string(),
        token: token.to_string(),
        location: location.to_string(),
        coupons_redeemed,
    })
    .collect()
}

fn seed_rules(now: DateTime<Utc>) -> Vec<CouponRule> {
    [
        (
            "1",
            "Cadastro de Novo Cliente",
            "Emite um cupom de 25% para novos clientes",
            CouponType::FirstPurchase,
            25,
            TriggerType::Registration,
            true,
            30,
        ),
        (
            "2",
            "Aniversário do Cliente",
            "Emite um cupom de 15% no mês de aniversário do cliente",
            CouponType::Birthday,
            15,
            TriggerType::Birthday,
            true,
            25,
        ),
        (
            "3",
            "Cliente Frequente",
            "Emite um cupom de 10% após 5 compras",
            CouponType::Loyalty,
            10,
            TriggerType::PurchaseCount,
            true,
            20,
        ),
        (
            "4",
            "Promoção de Verão",
            "Cupom de 30% para a promoção de verão",
            CouponType::SpecialPromotion,
            30,
            TriggerType::Manual,
            false,
            15,
        ),
        (
            "5",
            "Programa de Indicação",
            "Cupom de 20% quando um cliente indica um amigo",
            CouponType::Referral,
            20,
            TriggerType::Manual,
            true,
            10,
        ),
    ]
    .into_iter()
    .map(
        |(id, name, description, coupon_type, discount, trigger_type, is_active, created_ago)| {
            CouponRule {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                coupon_type,
                discount,
                trigger_type,
                is_active,
                created_at: days_from(now, -created_ago),
            }
        },
    )
    .collect()
}
