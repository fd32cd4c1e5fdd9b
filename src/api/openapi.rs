use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, SettleRequest, SettleResponse, SmartSplitRequest},
    core::{
        models::{BalanceMap, ParticipantRecord, TransferInstruction},
        resolver::{ManualSplit, MlSplit, Strategy},
        services::{ResolvedBalances, SplitOutcome},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::smart_split,
        super::handlers::resolve_balances,
        super::handlers::settle
    ),
    components(schemas(
        SmartSplitRequest,
        ManualSplit,
        MlSplit,
        ParticipantRecord,
        SettleRequest,
        SettleResponse,
        ErrorResponse,
        BalanceMap,
        TransferInstruction,
        Strategy,
        ResolvedBalances,
        SplitOutcome
    )),
    info(
        title = "SmartSplit API",
        description = "Resolves shared-expense balances and settles them with peer-to-peer transfers",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
