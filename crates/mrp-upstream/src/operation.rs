//! Operation descriptors.
//!
//! Every upstream call is described by a constant [`Operation`]: the path it
//! hits, whether it acts on behalf of a user, how success is recognised and
//! which status and message a failure surfaces with. The per-operation
//! clients only build bodies and pick payload fields; everything else is
//! driven by this table.
//!
//! | Operation | Method | Path | Identity |
//! |-----------|--------|------|----------|
//! | `authenticate` | POST | `/authenticate_user/` | no |
//! | `get_employee` | GET | `/get_employee/` | yes |
//! | `reset_password` | POST | `/reset_password/` | yes |
//! | `get_production_order` | GET | `/get_production_order/` | yes |
//! | `get_workorder` | GET | `/get_workorder/` | yes |
//! | `get_reasons_loss` | GET | `/get_reasons_loss/` | no |
//! | `get_products` | GET | `/get_products/` | no |
//! | `start_workorder` .. `consume_component_workorder` | POST | `/<verb>_workorder/` | yes |

/// HTTP method used for an upstream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
}

/// How a received envelope is recognised as successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRule {
    /// `status == "success"`.
    Status,
    /// The named payload field is present and non-empty.
    Field(&'static str),
}

/// Descriptor of one upstream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Stable name used in logs and errors.
    pub name: &'static str,
    pub method: UpstreamMethod,
    /// Path appended to the configured base URL.
    pub path: &'static str,
    /// Whether the caller's identity claim must be validated and forwarded.
    pub requires_identity: bool,
    /// Failure message used when the upstream gives none.
    pub default_message: &'static str,
    /// Status surfaced for transport failures.
    pub unreachable_status: u16,
    /// Status surfaced when the upstream rejects the request.
    pub rejected_status: u16,
    /// Replaces `default_message` on rejections without upstream detail.
    pub rejected_message: Option<&'static str>,
    pub success: SuccessRule,
    /// Message returned to the caller by command operations.
    pub success_message: &'static str,
}

impl Operation {
    /// Message surfaced for a rejection, preferring the upstream detail.
    pub fn rejection_message(&self, detail: Option<&str>) -> String {
        detail
            .filter(|d| !d.is_empty())
            .or(self.rejected_message)
            .unwrap_or(self.default_message)
            .to_string()
    }
}

const ORDER_NOT_FOUND: &str = "order not found";
const REQUEST_ERROR: &str = "upstream request error";

/// Workorder command: POST on behalf of a user, 400 on any failure.
const fn command(
    name: &'static str,
    path: &'static str,
    default_message: &'static str,
    success_message: &'static str,
) -> Operation {
    Operation {
        name,
        method: UpstreamMethod::Post,
        path,
        requires_identity: true,
        default_message,
        unreachable_status: 400,
        rejected_status: 400,
        rejected_message: None,
        success: SuccessRule::Status,
        success_message,
    }
}

/// Read-only listing: GET, 500 when the upstream does not report success.
const fn listing(name: &'static str, path: &'static str, requires_identity: bool) -> Operation {
    Operation {
        name,
        method: UpstreamMethod::Get,
        path,
        requires_identity,
        default_message: REQUEST_ERROR,
        unreachable_status: 400,
        rejected_status: 500,
        rejected_message: None,
        success: SuccessRule::Status,
        success_message: "",
    }
}

pub const AUTHENTICATE: Operation = Operation {
    name: "authenticate_user",
    method: UpstreamMethod::Post,
    path: "/authenticate_user/",
    requires_identity: false,
    default_message: "invalid credentials",
    unreachable_status: 401,
    rejected_status: 400,
    rejected_message: None,
    success: SuccessRule::Field("employee"),
    success_message: "",
};

pub const GET_EMPLOYEE: Operation = Operation {
    name: "get_employee",
    method: UpstreamMethod::Get,
    path: "/get_employee/",
    requires_identity: true,
    default_message: "user not found",
    unreachable_status: 400,
    rejected_status: 400,
    rejected_message: None,
    success: SuccessRule::Field("employee"),
    success_message: "",
};

pub const RESET_PASSWORD: Operation = Operation {
    name: "reset_password",
    method: UpstreamMethod::Post,
    path: "/reset_password/",
    requires_identity: true,
    default_message: "user not found",
    unreachable_status: 400,
    rejected_status: 500,
    rejected_message: Some("access denied"),
    success: SuccessRule::Status,
    success_message: "Password changed successfully",
};

pub const GET_PRODUCTION_ORDERS: Operation =
    listing("get_production_order", "/get_production_order/", true);

pub const GET_WORKORDERS: Operation = listing("get_workorder", "/get_workorder/", true);

pub const GET_REASONS_LOSS: Operation = listing("get_reasons_loss", "/get_reasons_loss/", false);

pub const GET_PRODUCTS: Operation = listing("get_products", "/get_products/", false);

pub const START_WORKORDER: Operation = command(
    "start_workorder",
    "/start_workorder/",
    ORDER_NOT_FOUND,
    "Workorder started successfully",
);

pub const PAUSE_WORKORDER: Operation = command(
    "pause_workorder",
    "/pause_workorder/",
    ORDER_NOT_FOUND,
    "Workorder paused successfully",
);

pub const FINISH_WORKORDER: Operation = command(
    "finish_workorder",
    "/finish_workorder/",
    ORDER_NOT_FOUND,
    "Workorder finished successfully",
);

pub const BLOCK_WORKORDER: Operation = command(
    "block_workorder",
    "/block_workorder/",
    ORDER_NOT_FOUND,
    "Workorder blocked successfully",
);

pub const UNBLOCK_WORKORDER: Operation = command(
    "unblock_workorder",
    "/unblock_workorder/",
    ORDER_NOT_FOUND,
    "Workorder unblocked successfully",
);

pub const ADD_COMPONENT: Operation = command(
    "add_components_workorder",
    "/add_components_workorder/",
    ORDER_NOT_FOUND,
    "Component added successfully",
);

pub const CONSUME_COMPONENT: Operation = command(
    "consume_component_workorder",
    "/consume_component_workorder/",
    "component not found",
    "Component consumed successfully",
);

/// Every operation, in table order.
pub const ALL: [&Operation; 14] = [
    &AUTHENTICATE,
    &GET_EMPLOYEE,
    &RESET_PASSWORD,
    &GET_PRODUCTION_ORDERS,
    &GET_WORKORDERS,
    &GET_REASONS_LOSS,
    &GET_PRODUCTS,
    &START_WORKORDER,
    &PAUSE_WORKORDER,
    &FINISH_WORKORDER,
    &BLOCK_WORKORDER,
    &UNBLOCK_WORKORDER,
    &ADD_COMPONENT,
    &CONSUME_COMPONENT,
];
