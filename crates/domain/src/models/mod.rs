//! Domain models for Bookline.

pub mod analytics;
pub mod api_key;
pub mod appointment;
pub mod client;
pub mod employee;
pub mod membership;
pub mod organization;
pub mod plan;
pub mod reservation;
pub mod service;

pub use analytics::{
    AnalyticsGroupBy, AnalyticsPeriod, AnalyticsQuery, AnalyticsResponse, AnalyticsSummary,
    DemandHeatmap, EmployeeRollup, Insight, SeriesPoint, ServiceRollup,
};
pub use api_key::{
    ApiKeySummary, CreateApiKeyRequest, CreateApiKeyResponse, ListApiKeysQuery,
    ListApiKeysResponse,
};
pub use appointment::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, ListAppointmentsQuery,
    UpdateAppointmentStatusRequest,
};
pub use client::{Client, CreateClientRequest};
pub use employee::{CreateEmployeeRequest, Employee};
pub use membership::{
    Membership, MembershipStatus, MembershipStatusView, MembershipSummary, MembershipUi,
    StatusColor, SubscribeRequest,
};
pub use organization::{
    Branding, CreateOrganizationRequest, ListOrganizationsQuery, ListOrganizationsResponse,
    Organization, ReservationPolicy, ResolveOrganizationQuery, UpdateOrganizationRequest,
    WeekSchedule,
};
pub use plan::{ListPlansResponse, Plan};
pub use reservation::{
    BookingItem, CreateBookingRequest, GroupDecisionRequest, GroupDecisionResult, GroupSummary,
    ListReservationsQuery, ListReservationsResponse, Reservation, ReservationDecision,
    ReservationRow, ReservationStatus, UpdateReservationStatusRequest,
};
pub use service::{CreateServiceRequest, Service};
