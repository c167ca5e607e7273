//! Subscription models and delivery scheduling.

use chrono::{DateTime, Duration, Months, Utc};
use entity::sea_orm_active_enums::{DeliveryFrequency, SubscriptionStatus};

use crate::model::subscription::{
    CreateSubscriptionDto, DeliveryFrequencyDto, PaginatedSubscriptionsDto, SubscriptionDto,
    SubscriptionItemDto, SubscriptionItemInputDto, SubscriptionStatusDto, UpdateSubscriptionDto,
};

/// Date of the delivery following one at `from`.
///
/// Weekly and biweekly add 7 and 14 days; monthly and bimonthly add calendar months,
/// clamping to the last day of shorter months.
pub fn next_delivery_after(frequency: DeliveryFrequency, from: DateTime<Utc>) -> DateTime<Utc> {
    match frequency {
        DeliveryFrequency::Weekly => from + Duration::days(7),
        DeliveryFrequency::Biweekly => from + Duration::days(14),
        DeliveryFrequency::Monthly => add_months(from, 1),
        DeliveryFrequency::Bimonthly => add_months(from, 2),
    }
}

fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(months))
        .unwrap_or(from + Duration::days(30 * months as i64))
}

/// Subscription line priced at the discounted subscription rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionLine {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub pet_profile_id: Option<i32>,
    pub status: SubscriptionStatus,
    pub frequency: DeliveryFrequency,
    pub next_delivery_at: DateTime<Utc>,
    pub shipping_address: String,
    pub items: Vec<SubscriptionLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn from_entity(entity: entity::subscription::Model, items: Vec<SubscriptionLine>) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            pet_profile_id: entity.pet_profile_id,
            status: entity.status,
            frequency: entity.frequency,
            next_delivery_at: entity.next_delivery_at,
            shipping_address: entity.shipping_address,
            items,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            cancelled_at: entity.cancelled_at,
        }
    }

    pub fn into_dto(self) -> SubscriptionDto {
        SubscriptionDto {
            id: self.id,
            user_id: self.user_id,
            pet_profile_id: self.pet_profile_id,
            status: self.status.into(),
            frequency: self.frequency.into(),
            next_delivery_at: self.next_delivery_at,
            shipping_address: self.shipping_address,
            items: self
                .items
                .into_iter()
                .map(|item| SubscriptionItemDto {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                })
                .collect(),
            created_at: self.created_at,
            cancelled_at: self.cancelled_at,
        }
    }
}

impl From<DeliveryFrequency> for DeliveryFrequencyDto {
    fn from(frequency: DeliveryFrequency) -> Self {
        match frequency {
            DeliveryFrequency::Weekly => DeliveryFrequencyDto::Weekly,
            DeliveryFrequency::Biweekly => DeliveryFrequencyDto::Biweekly,
            DeliveryFrequency::Monthly => DeliveryFrequencyDto::Monthly,
            DeliveryFrequency::Bimonthly => DeliveryFrequencyDto::Bimonthly,
        }
    }
}

impl From<DeliveryFrequencyDto> for DeliveryFrequency {
    fn from(frequency: DeliveryFrequencyDto) -> Self {
        match frequency {
            DeliveryFrequencyDto::Weekly => DeliveryFrequency::Weekly,
            DeliveryFrequencyDto::Biweekly => DeliveryFrequency::Biweekly,
            DeliveryFrequencyDto::Monthly => DeliveryFrequency::Monthly,
            DeliveryFrequencyDto::Bimonthly => DeliveryFrequency::Bimonthly,
        }
    }
}

impl From<SubscriptionStatus> for SubscriptionStatusDto {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active => SubscriptionStatusDto::Active,
            SubscriptionStatus::Paused => SubscriptionStatusDto::Paused,
            SubscriptionStatus::Cancelled => SubscriptionStatusDto::Cancelled,
        }
    }
}

impl From<SubscriptionStatusDto> for SubscriptionStatus {
    fn from(status: SubscriptionStatusDto) -> Self {
        match status {
            SubscriptionStatusDto::Active => SubscriptionStatus::Active,
            SubscriptionStatusDto::Paused => SubscriptionStatus::Paused,
            SubscriptionStatusDto::Cancelled => SubscriptionStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionItemParam {
    pub product_id: i32,
    pub quantity: i32,
}

impl From<SubscriptionItemInputDto> for SubscriptionItemParam {
    fn from(dto: SubscriptionItemInputDto) -> Self {
        Self {
            product_id: dto.product_id,
            quantity: dto.quantity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSubscriptionParam {
    pub user_id: i32,
    pub pet_profile_id: Option<i32>,
    pub frequency: DeliveryFrequency,
    pub shipping_address: String,
    pub next_delivery_at: DateTime<Utc>,
    pub items: Vec<SubscriptionItemParam>,
}

impl CreateSubscriptionParam {
    /// First delivery is `start_date`, or `now` when omitted.
    pub fn from_dto(user_id: i32, dto: CreateSubscriptionDto, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            pet_profile_id: dto.pet_profile_id,
            frequency: dto.frequency.into(),
            shipping_address: dto.shipping_address,
            next_delivery_at: dto.start_date.unwrap_or(now),
            items: dto.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partial subscription update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionParam {
    pub frequency: Option<DeliveryFrequency>,
    pub shipping_address: Option<String>,
    pub next_delivery_at: Option<DateTime<Utc>>,
    pub items: Option<Vec<SubscriptionItemParam>>,
}

impl From<UpdateSubscriptionDto> for UpdateSubscriptionParam {
    fn from(dto: UpdateSubscriptionDto) -> Self {
        Self {
            frequency: dto.frequency.map(Into::into),
            shipping_address: dto.shipping_address,
            next_delivery_at: dto.next_delivery_at,
            items: dto
                .items
                .map(|items| items.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedSubscriptions {
    pub subscriptions: Vec<Subscription>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedSubscriptions {
    pub fn into_dto(self) -> PaginatedSubscriptionsDto {
        PaginatedSubscriptionsDto {
            subscriptions: self
                .subscriptions
                .into_iter()
                .map(Subscription::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 6, 0, 0).unwrap()
    }

    /// Tests day-based frequencies.
    ///
    /// Expected: +7 and +14 days
    #[test]
    fn adds_days_for_weekly_frequencies() {
        let start = at(2026, 3, 1);
        assert_eq!(
            next_delivery_after(DeliveryFrequency::Weekly, start),
            at(2026, 3, 8)
        );
        assert_eq!(
            next_delivery_after(DeliveryFrequency::Biweekly, start),
            at(2026, 3, 15)
        );
    }

    /// Tests month-based frequencies, including month-end clamping.
    ///
    /// Expected: Jan 31 + 1 month is Feb 28; Dec 15 + 2 months is Feb 15
    #[test]
    fn adds_calendar_months() {
        assert_eq!(
            next_delivery_after(DeliveryFrequency::Monthly, at(2026, 1, 31)),
            at(2026, 2, 28)
        );
        assert_eq!(
            next_delivery_after(DeliveryFrequency::Bimonthly, at(2025, 12, 15)),
            at(2026, 2, 15)
        );
    }
}
