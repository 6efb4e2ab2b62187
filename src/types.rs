use serde::{Deserialize, Serialize};

use crate::error::SupportError;

pub const SUPPORT_DIR: &str = ".supportdesk";

/// Literal prefix every order reference carries unless configured otherwise
pub const DEFAULT_ORDER_PREFIX: &str = "#PM157";

/// Number of digits the user types after the order prefix
pub const ORDER_SUFFIX_DIGITS: usize = 6;

/// Number of digits in a normalized contact number
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    OrderStatus,
    Cancellation,
    Return,
    Exchange,
    RefundStatus,
    WarrantyClaim,
    UpdateAddressContact,
    BrandAlliance,
}

crate::labeled_enum!(IssueType, SupportError::InvalidIssueType, {
    OrderStatus => ("order-status", "Order Status"),
    Cancellation => ("cancellation", "Cancellation"),
    Return => ("return", "Return"),
    Exchange => ("exchange", "Exchange"),
    RefundStatus => ("refund-status", "Refund Status"),
    WarrantyClaim => ("warranty-claim", "Warranty Claim"),
    UpdateAddressContact => ("update-contact", "Update address/contact"),
    BrandAlliance => ("brand-alliance", "Brand Alliance (Collaboration, PR, Jobs)"),
});

const RETURN_REASONS: &[SubReason] = &[
    SubReason::DamagedItem,
    SubReason::WrongItem,
    SubReason::MissingItem,
    SubReason::SizeIssue,
    SubReason::QualityIssue,
];

const EXCHANGE_REASONS: &[SubReason] = &[
    SubReason::SizeIssue,
    SubReason::WrongItem,
    SubReason::DamagedItem,
    SubReason::DesignPreference,
];

impl IssueType {
    /// Sub-reasons a customer must pick from for this issue type.
    ///
    /// Empty for issue types that take no sub-reason.
    pub fn sub_reasons(&self) -> &'static [SubReason] {
        match self {
            IssueType::Return => RETURN_REASONS,
            IssueType::Exchange => EXCHANGE_REASONS,
            _ => &[],
        }
    }

    pub fn requires_sub_reason(&self) -> bool {
        !self.sub_reasons().is_empty()
    }

    /// Brand alliance enquiries are not tied to an order
    pub fn requires_order_reference(&self) -> bool {
        *self != IssueType::BrandAlliance
    }

    pub fn allows(&self, reason: SubReason) -> bool {
        self.sub_reasons().contains(&reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubReason {
    DamagedItem,
    WrongItem,
    MissingItem,
    SizeIssue,
    QualityIssue,
    DesignPreference,
}

crate::labeled_enum!(SubReason, SupportError::UnknownSubReason, {
    DamagedItem => ("damaged-item", "Damaged Item"),
    WrongItem => ("wrong-item", "Wrong Item"),
    MissingItem => ("missing-item", "Missing Item"),
    SizeIssue => ("size-issue", "Size Issue"),
    QualityIssue => ("quality-issue", "Quality Issue"),
    DesignPreference => ("design-preference", "Color/Design Preference"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

crate::labeled_enum!(ContactMethod, SupportError::InvalidContactMethod, {
    Email => ("email", "Email"),
    Phone => ("phone", "Phone"),
});

pub const VALID_ISSUE_TYPES: &[&str] = &[
    "order-status",
    "cancellation",
    "return",
    "exchange",
    "refund-status",
    "warranty-claim",
    "update-contact",
    "brand-alliance",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_reasons_only_for_return_and_exchange() {
        for issue in IssueType::ALL {
            let expected = matches!(issue, IssueType::Return | IssueType::Exchange);
            assert_eq!(issue.requires_sub_reason(), expected, "{issue}");
        }
    }

    #[test]
    fn test_order_reference_required_except_brand_alliance() {
        for issue in IssueType::ALL {
            let expected = *issue != IssueType::BrandAlliance;
            assert_eq!(issue.requires_order_reference(), expected, "{issue}");
        }
    }

    #[test]
    fn test_allows() {
        assert!(IssueType::Return.allows(SubReason::QualityIssue));
        assert!(!IssueType::Exchange.allows(SubReason::QualityIssue));
        assert!(IssueType::Exchange.allows(SubReason::DesignPreference));
        assert!(!IssueType::OrderStatus.allows(SubReason::DamagedItem));
    }

    #[test]
    fn test_issue_type_parse_label_and_slug() {
        assert_eq!(
            "Brand Alliance (Collaboration, PR, Jobs)"
                .parse::<IssueType>()
                .unwrap(),
            IssueType::BrandAlliance
        );
        assert_eq!(
            "update-contact".parse::<IssueType>().unwrap(),
            IssueType::UpdateAddressContact
        );
        assert!(matches!(
            "Missing".parse::<IssueType>(),
            Err(SupportError::InvalidIssueType(_))
        ));
    }

    #[test]
    fn test_valid_issue_types_match_slugs() {
        let slugs: Vec<&str> = IssueType::ALL.iter().map(|i| i.slug()).collect();
        assert_eq!(slugs, VALID_ISSUE_TYPES);
    }

    #[test]
    fn test_contact_method_parse() {
        assert_eq!("EMAIL".parse::<ContactMethod>().unwrap(), ContactMethod::Email);
        assert_eq!("phone".parse::<ContactMethod>().unwrap(), ContactMethod::Phone);
        assert!("fax".parse::<ContactMethod>().is_err());
    }
}
