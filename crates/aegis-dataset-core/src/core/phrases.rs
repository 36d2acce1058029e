// crates/aegis-dataset-core/src/core/phrases.rs
// ============================================================================
// Module: Phrase Pools
// Description: Fixed natural-language pools for messages and tool arguments.
// Purpose: Keep user-visible sample text out of the generation logic.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Occupant-facing text is Korean; developer instructions are English.
//! Every pool is non-empty and sampled uniformly.

// ============================================================================
// SECTION: Developer Instructions
// ============================================================================

/// Developer message variants.
pub const DEVELOPER_MESSAGES: [&str; 3] = [
    "You are a function calling model. Use the provided tools only when needed.",
    "You can call tools to respond. If no tool is needed, respond normally.",
    "Follow the tool schemas strictly. Do not invent tools.",
];

// ============================================================================
// SECTION: Occupant Inquiries
// ============================================================================

/// Inquiries for an actionable forward collision.
pub const INQUIRY_FORWARD_COLLISION: [&str; 3] =
    ["앞차와 너무 가까워요", "전방 위험 경고가 필요해요", "전방 추돌 위험이 있는지 확인해줘"];
/// Inquiries for an actionable intrusion.
pub const INQUIRY_INTRUSION: [&str; 3] =
    ["차량 시스템에 이상이 있는 것 같아요", "보안 침입 경고가 필요해요", "네트워크 침입 가능성이 있나요?"];
/// Inquiries for an actionable blind spot risk.
pub const INQUIRY_BLIND_SPOT: [&str; 3] =
    ["차선 변경하려는데 옆이 위험해요", "사각지대에 차량이 있나요?", "옆 차가 너무 가까워요"];
/// Inquiries for an actionable lane departure.
pub const INQUIRY_LANE_DEPARTURE: [&str; 3] =
    ["차선 이탈 경고 해줘", "차선에서 벗어나는 것 같아", "차선 유지가 어려워"];
/// Inquiries for actionable drowsiness.
pub const INQUIRY_DROWSINESS: [&str; 3] = ["졸음이 오는 것 같아", "졸음 경고 좀 해줘", "집중이 잘 안 돼"];
/// Inquiries for an overheating battery.
pub const INQUIRY_EV_BATTERY: [&str; 3] =
    ["배터리 온도가 높은가요?", "배터리 열 상태가 위험해요", "배터리 경고가 떠요"];
/// Inquiries for road hazards.
pub const INQUIRY_HAZARDS: [&str; 3] =
    ["전방 도로에 장애물이 있어요", "낙하물 위험이 있나요?", "공사 구간이 감지됐나요?"];
/// Inquiries when nothing is wrong.
pub const INQUIRY_NO_ACTION: [&str; 3] =
    ["현재 위험이 있는지 알려줘", "지금 상태 괜찮아?", "경고가 필요한 상황인가?"];
/// Small-talk inquiries.
pub const INQUIRY_GENERAL: [&str; 3] =
    ["오늘 운전 팁 알려줘", "지금 내 차 상태 어때?", "피곤할 때 운전은 어떻게 해야 해?"];

/// Uncertain forward collision inquiries.
pub const UNSURE_FORWARD_COLLISION: [&str; 3] =
    ["전방이 위험한가요?", "앞차랑 가까운 것 같은데 확실해?", "전방 위험 판단해줘"];
/// Uncertain blind spot inquiries.
pub const UNSURE_BLIND_SPOT: [&str; 3] =
    ["사각지대에 차량이 있는지 애매해요", "옆차가 있는지 잘 모르겠어", "차선 변경해도 될까?"];
/// Uncertain lane departure inquiries.
pub const UNSURE_LANE_DEPARTURE: [&str; 3] =
    ["차선 이탈인가요?", "차선이 잘 안 보여요", "차선 유지 상태가 불확실해"];
/// Uncertain drowsiness inquiries.
pub const UNSURE_DROWSINESS: [&str; 3] =
    ["졸음 상태인지 애매해요", "졸음 감지가 불확실해", "졸음 경고가 필요한가?"];
/// Uncertain intrusion inquiries.
pub const UNSURE_INTRUSION: [&str; 3] =
    ["시스템 침입 경고가 맞나요?", "보안 위험이 있는지 확실치 않아", "네트워크 이상이 있나요?"];
/// Uncertain hazard inquiries.
pub const UNSURE_HAZARDS: [&str; 3] =
    ["전방 장애물 감지가 불확실해요", "도로 상황이 애매해", "환경 위험이 있는지 알려줘"];

// ============================================================================
// SECTION: Assistant Replies
// ============================================================================

/// Replies when no action is needed.
pub const NORMAL_REPLIES: [&str; 3] = [
    "현재 상태로는 즉각적인 조치는 필요 없어 보입니다. 계속 주의 운전하세요.",
    "지금은 위험 신호가 뚜렷하지 않습니다. 상황이 바뀌면 알려주세요.",
    "현재 센서 기준으로는 경고가 필요하지 않습니다.",
];

/// Clarification templates; `{hint}` names the suspected risk.
pub const CLARIFICATION_TEMPLATES: [&str; 3] = [
    "센서 신뢰도가 낮아 {hint} 여부를 확정하기 어렵습니다. 주변 상황을 한 번 더 확인해 주시겠습니까?",
    "현재 데이터가 불확실합니다. {hint} 관련 추가 정보(차량 위치/주변 차량/전방 상황)를 제공해 주세요.",
    "신뢰도가 낮습니다. {hint} 상황이 맞는지 확인이 필요합니다.",
];

/// Hint used when no risk could be identified.
pub const GENERIC_RISK_HINT: &str = "위험";

/// Small-talk replies.
pub const GENERAL_REPLIES: [&str; 3] = [
    "네, 무엇을 도와드릴까요?",
    "말씀해 주세요. 현재 주행 상태도 함께 확인하겠습니다.",
    "알겠습니다. 질문을 이어서 해주세요.",
];

/// Fills a clarification template with the risk hint.
#[must_use]
pub fn clarification(template: &str, hint: &str) -> String {
    template.replace("{hint}", hint)
}

// ============================================================================
// SECTION: Tool Arguments
// ============================================================================

/// HUD text for a high-severity forward collision with belt pre-tension.
pub const HUD_FORWARD_CRITICAL: [&str; 3] =
    ["전방 충돌 위험! 즉시 감속하세요", "전방 위험! 제동 준비", "전방 추돌 위험"];
/// HUD text for a forward collision warning.
pub const HUD_FORWARD_WARNING: [&str; 3] =
    ["전방 위험. 감속하세요", "전방 충돌 위험 감지", "전방 상황 주의"];
/// Cluster text for a low-confidence forward collision.
pub const CLUSTER_FORWARD_INFO: [&str; 2] = ["전방 상황 주의", "전방 위험 가능성"];
/// HUD text for a blind spot warning.
pub const HUD_BLIND_SPOT: [&str; 2] = ["사각지대 차량 감지", "사각지대 위험. 차선 변경 주의"];
/// Rest recommendation reasons.
pub const REST_REASONS: [&str; 3] = ["졸음 감지", "주의력 저하", "운전 피로 누적"];

/// Cluster text for a critical battery.
pub const CLUSTER_BATTERY_CRITICAL: &str = "배터리 열 상태 위험";
/// Cluster text for a hot battery.
pub const CLUSTER_BATTERY_HOT: &str = "배터리 온도 상승";
/// Navigation text for a low-confidence road hazard.
pub const NAVIGATION_HAZARD_INFO: &str = "전방 환경 위험 가능성";

/// Safety log event type for intrusions.
pub const INTRUSION_EVENT_TYPE: &str = "vehicle_system_intrusion";
/// Safety log message for confident intrusions.
pub const INTRUSION_SUSPECTED: &str = "intrusion suspected";
/// Safety log message for low-confidence intrusions.
pub const INTRUSION_LOW_CONFIDENCE: &str = "intrusion low confidence";
/// Safe mode reason for an overheating battery.
pub const SAFE_MODE_BATTERY_REASON: &str = "ev_battery_thermal_critical";
