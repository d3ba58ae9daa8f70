//! Built-in diagnosis catalog: ten blocks covering the main operational
//! areas of a restaurant. Option `value` tokens are what the screens record;
//! wrong (and some partially-right) choices carry recommendation templates.

use super::{AnswerOption, Block, Priority, Question, Recommendation};

fn rec(title: &str, description: &str, priority: Priority, category: &str) -> Recommendation {
    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        priority,
        category: category.to_string(),
    }
}

fn opt(id: &str, text: &str, value: &str, correct: bool) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: text.to_string(),
        value: value.to_string(),
        correct,
        recommendation: None,
    }
}

fn opt_rec(
    id: &str,
    text: &str,
    value: &str,
    correct: bool,
    recommendation: Recommendation,
) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: text.to_string(),
        value: value.to_string(),
        correct,
        recommendation: Some(recommendation),
    }
}

fn question(id: &str, prompt: &str, options: Vec<AnswerOption>) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options,
    }
}

fn block(id: &str, title: &str, description: &str, questions: Vec<Question>) -> Block {
    Block {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        questions,
    }
}

pub fn builtin_blocks() -> Vec<Block> {
    vec![
        block(
            "menu_engineering",
            "Menu Engineering",
            "How well the menu is priced, structured and analyzed.",
            vec![
                question(
                    "menu_profit_analysis",
                    "Do you know the margin of every dish on your menu?",
                    vec![
                        opt("mpa_all", "Yes, for every dish", "all_dishes", true),
                        opt_rec(
                            "mpa_some",
                            "Only for the main dishes",
                            "main_dishes",
                            false,
                            rec(
                                "Calculate margins for the full menu",
                                "Work out food cost and margin for every dish, not just the headliners. Low-volume items often hide the worst margins.",
                                Priority::High,
                                "menu",
                            ),
                        ),
                        opt_rec(
                            "mpa_none",
                            "No, prices follow the competition",
                            "competition",
                            false,
                            rec(
                                "Introduce dish-level cost accounting",
                                "Start tracking ingredient cost per dish so pricing decisions rest on your numbers instead of the neighbor's menu.",
                                Priority::High,
                                "menu",
                            ),
                        ),
                    ],
                ),
                question(
                    "menu_review_cadence",
                    "How often do you review the menu against sales data?",
                    vec![
                        opt("mrc_quarterly", "At least quarterly", "quarterly", true),
                        opt_rec(
                            "mrc_yearly",
                            "About once a year",
                            "yearly",
                            false,
                            rec(
                                "Review the menu quarterly",
                                "Set a quarterly review of sales mix and margins; drop or rework the bottom performers.",
                                Priority::Medium,
                                "menu",
                            ),
                        ),
                        opt_rec(
                            "mrc_never",
                            "The menu rarely changes",
                            "never",
                            false,
                            rec(
                                "Schedule a first menu audit",
                                "Pull the last three months of sales and flag dishes that neither sell nor earn. A static menu slowly erodes margin.",
                                Priority::Medium,
                                "menu",
                            ),
                        ),
                    ],
                ),
            ],
        ),
        block(
            "kitchen_workflow",
            "Kitchen Workflow",
            "Prep organization, station layout and ticket times.",
            vec![
                question(
                    "kw_ticket_times",
                    "Do you measure ticket times during service?",
                    vec![
                        opt("kwt_tracked", "Yes, and we review them weekly", "tracked", true),
                        opt_rec(
                            "kwt_feel",
                            "We go by feel",
                            "by_feel",
                            false,
                            rec(
                                "Start tracking ticket times",
                                "Record time from ticket to pass for two weeks. You cannot shorten what you do not measure.",
                                Priority::High,
                                "kitchen",
                            ),
                        ),
                        opt_rec(
                            "kwt_rush",
                            "Only when guests complain",
                            "on_complaint",
                            false,
                            rec(
                                "Make ticket times a daily metric",
                                "Complaints lag the problem. Track ticket times every service and set a target per course.",
                                Priority::Medium,
                                "kitchen",
                            ),
                        ),
                    ],
                ),
                question(
                    "kw_prep_lists",
                    "Are prep lists written and checked every day?",
                    vec![
                        opt("kwp_daily", "Yes, per station, every day", "daily", true),
                        opt_rec(
                            "kwp_head",
                            "The chef keeps it in their head",
                            "in_head",
                            false,
                            rec(
                                "Write station prep lists",
                                "Put prep on paper per station with par levels. Memory-run kitchens over-prep on quiet days and run out on busy ones.",
                                Priority::Medium,
                                "kitchen",
                            ),
                        ),
                        opt("kwp_sometimes", "Only before busy weekends", "weekends_only", false),
                    ],
                ),
            ],
        ),
        block(
            "inventory_control",
            "Inventory Control",
            "Stock counts, waste tracking and ordering discipline.",
            vec![
                question(
                    "inv_counts",
                    "How often do you count your full inventory?",
                    vec![
                        opt("invc_weekly", "Weekly or more often", "weekly", true),
                        opt_rec(
                            "invc_monthly",
                            "Monthly",
                            "monthly",
                            false,
                            rec(
                                "Move to weekly counts",
                                "Count high-value items weekly. Monthly counts find variance a month too late to act on it.",
                                Priority::Medium,
                                "inventory",
                            ),
                        ),
                        opt_rec(
                            "invc_delivery",
                            "Only when a delivery arrives",
                            "on_delivery",
                            false,
                            rec(
                                "Introduce scheduled inventory counts",
                                "Set a fixed weekly count with one owner. Ad-hoc counting hides theft, spoilage and over-ordering.",
                                Priority::High,
                                "inventory",
                            ),
                        ),
                    ],
                ),
                question(
                    "inv_waste",
                    "Is food waste weighed or logged?",
                    vec![
                        opt("invw_logged", "Yes, logged daily with reasons", "logged", true),
                        opt_rec(
                            "invw_binned",
                            "It goes in the bin unrecorded",
                            "unrecorded",
                            false,
                            rec(
                                "Start a waste log",
                                "Log what gets thrown away and why for two weeks. Most kitchens find 2-4% of food cost in the first month.",
                                Priority::High,
                                "inventory",
                            ),
                        ),
                        opt("invw_estimate", "We estimate it roughly", "estimated", false),
                    ],
                ),
            ],
        ),
        block(
            "staffing",
            "Staffing & Scheduling",
            "Rotas, labor cost and onboarding.",
            vec![
                question(
                    "staff_labor_pct",
                    "Do you track labor cost as a share of revenue?",
                    vec![
                        opt("slp_weekly", "Yes, weekly against a target", "weekly_target", true),
                        opt_rec(
                            "slp_payroll",
                            "Only when payroll runs",
                            "at_payroll",
                            false,
                            rec(
                                "Track labor percentage weekly",
                                "Compare scheduled hours to forecast revenue before the week starts, not after payroll closes.",
                                Priority::Medium,
                                "staffing",
                            ),
                        ),
                        opt_rec(
                            "slp_no",
                            "No",
                            "not_tracked",
                            false,
                            rec(
                                "Set a labor cost target",
                                "Pick a labor percentage target for your format and measure every week against it.",
                                Priority::High,
                                "staffing",
                            ),
                        ),
                    ],
                ),
                question(
                    "staff_onboarding",
                    "Do new hires follow a written onboarding plan?",
                    vec![
                        opt("so_written", "Yes, with a checklist per role", "written_plan", true),
                        opt_rec(
                            "so_shadow",
                            "They shadow whoever is on shift",
                            "shadowing",
                            false,
                            rec(
                                "Write role onboarding checklists",
                                "A one-page checklist per role makes training consistent and cuts the time to a dependable shift.",
                                Priority::Low,
                                "staffing",
                            ),
                        ),
                        opt("so_none", "They learn on the job", "on_the_job", false),
                    ],
                ),
            ],
        ),
        block(
            "service_quality",
            "Service Quality",
            "Guest experience, feedback loops and complaint handling.",
            vec![
                question(
                    "svc_feedback",
                    "How do you collect guest feedback?",
                    vec![
                        opt("svf_systematic", "Systematically, and we review it", "systematic", true),
                        opt_rec(
                            "svf_reviews",
                            "We read online reviews when they appear",
                            "online_only",
                            false,
                            rec(
                                "Build an in-house feedback loop",
                                "Ask at the table or via a QR card. Online reviews skew to extremes and arrive too late to fix the visit.",
                                Priority::Medium,
                                "service",
                            ),
                        ),
                        opt_rec(
                            "svf_none",
                            "We don't collect feedback",
                            "none",
                            false,
                            rec(
                                "Start collecting guest feedback",
                                "Begin with a simple comment card or follow-up message for regulars. You are currently flying blind on experience.",
                                Priority::High,
                                "service",
                            ),
                        ),
                    ],
                ),
                question(
                    "svc_complaints",
                    "Is there a standard for resolving complaints on the spot?",
                    vec![
                        opt("svc_standard", "Yes, staff are empowered to resolve", "empowered", true),
                        opt_rec(
                            "svc_manager",
                            "Everything goes through the manager",
                            "manager_only",
                            false,
                            rec(
                                "Empower staff to resolve complaints",
                                "Give servers a clear envelope (replace, discount, comp) they can apply without hunting for a manager.",
                                Priority::Medium,
                                "service",
                            ),
                        ),
                        opt("svc_adhoc", "Handled case by case", "ad_hoc", false),
                    ],
                ),
            ],
        ),
        block(
            "delivery_takeaway",
            "Delivery & Takeaway",
            "Off-premise channels, packaging and aggregator economics.",
            vec![
                question(
                    "del_channel_margin",
                    "Do you know your margin per delivery channel after commissions?",
                    vec![
                        opt("dcm_yes", "Yes, per channel", "per_channel", true),
                        opt_rec(
                            "dcm_blended",
                            "Only blended across all sales",
                            "blended",
                            false,
                            rec(
                                "Split margins by channel",
                                "Separate dine-in, own takeaway and each aggregator. 30% commission can turn a profitable dish into a loss.",
                                Priority::High,
                                "delivery",
                            ),
                        ),
                        opt("dcm_no", "No", "unknown", false),
                    ],
                ),
                question(
                    "del_packaging",
                    "Is packaging tested for your travel times?",
                    vec![
                        opt("dp_tested", "Yes, dishes are tested in transit", "tested", true),
                        opt_rec(
                            "dp_untested",
                            "We use whatever the supplier offers",
                            "supplier_default",
                            false,
                            rec(
                                "Run a packaging transit test",
                                "Order your own food to the edge of the delivery zone and eat it. Adjust packaging for anything that arrives poorly.",
                                Priority::Low,
                                "delivery",
                            ),
                        ),
                        opt("dp_partial", "Only for fragile dishes", "fragile_only", false),
                    ],
                ),
            ],
        ),
        block(
            "marketing",
            "Marketing & Loyalty",
            "Guest acquisition, retention and local presence.",
            vec![
                question(
                    "mkt_repeat",
                    "Do you know your share of repeat guests?",
                    vec![
                        opt("mr_tracked", "Yes, we track repeat visits", "tracked", true),
                        opt_rec(
                            "mr_guess",
                            "We recognize regulars by face",
                            "by_face",
                            false,
                            rec(
                                "Measure repeat visits",
                                "Use loyalty sign-ups or POS data to measure how many guests come back within 60 days.",
                                Priority::Medium,
                                "marketing",
                            ),
                        ),
                        opt("mr_no", "No idea", "unknown", false),
                    ],
                ),
                question(
                    "mkt_profiles",
                    "Are your map and review profiles claimed and current?",
                    vec![
                        opt("mp_current", "Yes, hours, menu and photos are current", "current", true),
                        opt_rec(
                            "mp_stale",
                            "Claimed, but rarely updated",
                            "stale",
                            false,
                            rec(
                                "Refresh your public profiles",
                                "Update hours, menu and photos on map and review platforms; stale listings cost walk-ins every week.",
                                Priority::Low,
                                "marketing",
                            ),
                        ),
                        opt_rec(
                            "mp_unclaimed",
                            "Not claimed",
                            "unclaimed",
                            false,
                            rec(
                                "Claim your business profiles",
                                "Claim the map and review listings for the restaurant so you control what guests see first.",
                                Priority::Medium,
                                "marketing",
                            ),
                        ),
                    ],
                ),
            ],
        ),
        block(
            "finance",
            "Finance & Margins",
            "P&L discipline, prime cost and cash planning.",
            vec![
                question(
                    "fin_prime_cost",
                    "Do you review prime cost (food + labor) monthly?",
                    vec![
                        opt("fpc_monthly", "Yes, monthly with the P&L", "monthly", true),
                        opt_rec(
                            "fpc_accountant",
                            "The accountant handles it",
                            "accountant",
                            false,
                            rec(
                                "Own your prime cost number",
                                "Ask for food and labor as one prime-cost line each month and set a ceiling for it. It is the number you can actually manage.",
                                Priority::High,
                                "finance",
                            ),
                        ),
                        opt("fpc_no", "We look at the bank balance", "bank_balance", false),
                    ],
                ),
                question(
                    "fin_cash_buffer",
                    "Do you hold a cash buffer for slow months?",
                    vec![
                        opt("fcb_yes", "Yes, at least one month of costs", "buffered", true),
                        opt_rec(
                            "fcb_thin",
                            "We run close to zero",
                            "thin",
                            false,
                            rec(
                                "Build a one-month cash buffer",
                                "Move a fixed small percentage of weekly revenue aside until one month of operating costs is covered.",
                                Priority::Medium,
                                "finance",
                            ),
                        ),
                        opt("fcb_credit", "We rely on credit when needed", "credit", false),
                    ],
                ),
            ],
        ),
        block(
            "food_safety",
            "Food Safety & Hygiene",
            "HACCP routines, temperature logs and cleaning schedules.",
            vec![
                question(
                    "fs_temp_logs",
                    "Are fridge and freezer temperatures logged?",
                    vec![
                        opt("fst_daily", "Yes, daily on a checklist", "daily_log", true),
                        opt_rec(
                            "fst_glance",
                            "Staff glance at the displays",
                            "glance",
                            false,
                            rec(
                                "Start daily temperature logs",
                                "Log every unit twice a day. An unlogged failure means discarding the whole unit's contents on inspection.",
                                Priority::High,
                                "safety",
                            ),
                        ),
                        opt("fst_broken", "Some thermometers are broken", "broken", false),
                    ],
                ),
                question(
                    "fs_cleaning",
                    "Is there a signed cleaning schedule?",
                    vec![
                        opt("fsc_signed", "Yes, signed per shift", "signed", true),
                        opt_rec(
                            "fsc_verbal",
                            "Cleaning is assigned verbally",
                            "verbal",
                            false,
                            rec(
                                "Put the cleaning schedule on paper",
                                "A signed per-shift schedule creates accountability and is the first thing inspectors ask for.",
                                Priority::Medium,
                                "safety",
                            ),
                        ),
                        opt("fsc_closing", "Whoever closes cleans", "closing_crew", false),
                    ],
                ),
            ],
        ),
        block(
            "suppliers",
            "Supplier Management",
            "Sourcing, price checks and delivery acceptance.",
            vec![
                question(
                    "sup_price_checks",
                    "Do you compare supplier prices regularly?",
                    vec![
                        opt("spc_quarterly", "Yes, at least quarterly", "quarterly", true),
                        opt_rec(
                            "spc_loyal",
                            "We stay loyal to long-time suppliers",
                            "loyal",
                            false,
                            rec(
                                "Benchmark supplier prices quarterly",
                                "Loyalty is fine, blindness is not. Quote your top 20 items elsewhere each quarter and renegotiate drift.",
                                Priority::Medium,
                                "suppliers",
                            ),
                        ),
                        opt("spc_never", "Prices are accepted as invoiced", "as_invoiced", false),
                    ],
                ),
                question(
                    "sup_receiving",
                    "Are deliveries weighed and checked on arrival?",
                    vec![
                        opt("sr_checked", "Yes, against the order, every time", "checked", true),
                        opt_rec(
                            "sr_signed",
                            "We sign and check later",
                            "sign_first",
                            false,
                            rec(
                                "Check deliveries before signing",
                                "Weigh and inspect against the order before accepting. Claims after signature rarely succeed.",
                                Priority::Medium,
                                "suppliers",
                            ),
                        ),
                        opt("sr_trust", "We trust the driver", "trusted", false),
                    ],
                ),
            ],
        ),
    ]
}
