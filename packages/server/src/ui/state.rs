//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    AnnounceJoinUseCase, AnnounceLeaveUseCase, CloseConnectionUseCase, GetIdentityPresenceUseCase,
    GetOnlineUsersUseCase, OpenConnectionUseCase,
};

/// Shared application state
pub struct AppState {
    pub open_connection_usecase: Arc<OpenConnectionUseCase>,
    pub announce_join_usecase: Arc<AnnounceJoinUseCase>,
    pub announce_leave_usecase: Arc<AnnounceLeaveUseCase>,
    pub close_connection_usecase: Arc<CloseConnectionUseCase>,
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    pub get_identity_presence_usecase: Arc<GetIdentityPresenceUseCase>,
}
