use super::workflow::{
    Connection, LevelId, OrgLevel, Ritual, Team, WorkItem, WorkItemType, WorkflowModel,
};
use crate::graph::EdgeStyle;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn team(
    id: &str,
    name: &str,
    level: LevelId,
    team_type: &str,
    members: &[&str],
    collaborators: &[&str],
) -> Team {
    Team {
        id: id.to_owned(),
        name: name.to_owned(),
        members: strings(members),
        level,
        team_type: Some(team_type.to_owned()),
        collaborators: strings(collaborators),
    }
}

fn input(id: &str, title: &str, level: LevelId, source: &str) -> WorkItem {
    WorkItem {
        id: id.to_owned(),
        title: title.to_owned(),
        item_type: WorkItemType::Input,
        level,
        description: None,
        owning_team_id: None,
        status: None,
        source: Some(source.to_owned()),
    }
}

fn board(
    id: &str,
    title: &str,
    item_type: WorkItemType,
    level: LevelId,
    description: &str,
    owner: &str,
) -> WorkItem {
    WorkItem {
        id: id.to_owned(),
        title: title.to_owned(),
        item_type,
        level,
        description: Some(description.to_owned()),
        owning_team_id: Some(owner.to_owned()),
        status: None,
        source: None,
    }
}

fn ritual(
    id: &str,
    title: &str,
    level: LevelId,
    frequency: &str,
    owner: &str,
    participants: &[&str],
    agenda: &[&str],
) -> Ritual {
    Ritual {
        id: id.to_owned(),
        title: title.to_owned(),
        level,
        description: None,
        participants: strings(participants),
        agenda_items: strings(agenda),
        ritual_frequency: frequency.to_owned(),
        owning_team_id: Some(owner.to_owned()),
    }
}

fn connection(
    id: &str,
    from: &str,
    to: &str,
    label: Option<&str>,
    style: EdgeStyle,
) -> Connection {
    Connection {
        id: id.to_owned(),
        from: from.to_owned(),
        to: to.to_owned(),
        label: label.map(str::to_owned),
        style,
        interaction_mode: None,
    }
}

/// Small three-level organization shown when no graph file is given.
pub fn demo_model() -> WorkflowModel {
    let levels = [LevelId::Strategic, LevelId::Portfolio, LevelId::Team]
        .into_iter()
        .map(|id| OrgLevel {
            id,
            label: id.label().to_owned(),
        })
        .collect();

    let mut w3 = input("w3", "Carbon Neutrality 2026", LevelId::Portfolio, "Strategic Directive");
    w3.description = Some("Mandate filtered down from ESG Strategy".to_owned());

    WorkflowModel {
        levels,
        teams: vec![
            team(
                "t1",
                "Executive Team",
                LevelId::Strategic,
                "stream-aligned",
                &["CEO", "CPO", "CTO"],
                &["Board of Directors", "External Auditors", "Legal Counsel"],
            ),
            team(
                "t2",
                "Product Ops",
                LevelId::Portfolio,
                "enabling",
                &["Operations Lead", "Agile Coach"],
                &["HR Business Partners", "Finance", "Data Privacy Office"],
            ),
            team(
                "t3",
                "Platform Squad",
                LevelId::Team,
                "platform",
                &["Eng Manager", "Lead Dev"],
                &["Cloud Provider Support", "Security Team", "Design Systems Group"],
            ),
        ],
        work_items: vec![
            input("w1", "EU AI Act Compliance", LevelId::Strategic, "Regulation (External)"),
            input("w2", "Competitor X Series C", LevelId::Strategic, "Market Trends"),
            w3,
            input("w4", "Scale to 1M Users", LevelId::Team, "Portfolio Roadmap"),
            input("w5", "Latency Complaints", LevelId::Team, "Customer Support"),
            board(
                "board_port",
                "Portfolio Board",
                WorkItemType::Epic,
                LevelId::Portfolio,
                "Central tracker for all cross-team initiatives",
                "t2",
            ),
            board(
                "board_team",
                "Team Jira Board",
                WorkItemType::Story,
                LevelId::Team,
                "Active development sprint board",
                "t3",
            ),
        ],
        rituals: vec![
            ritual(
                "r_port_rev",
                "Portfolio Review",
                LevelId::Portfolio,
                "Weekly",
                "t2",
                &["VPs", "Directors", "Scrum Masters"],
                &["Review releases", "Review portfolio impacts", "Risk assessment"],
            ),
            ritual(
                "r_standup",
                "Daily Standup",
                LevelId::Team,
                "Daily",
                "t3",
                &["Team", "Scrum Master"],
                &["Review blockers", "Yesterday/Today", "Help needed"],
            ),
            ritual(
                "r_demo",
                "Sprint Demo",
                LevelId::Team,
                "Bi-weekly",
                "t3",
                &["Team", "Stakeholders"],
                &["Showcase work", "Gather feedback"],
            ),
        ],
        connections: vec![
            connection("c1", "w1", "board_port", Some("Flows to"), EdgeStyle::Plain),
            connection("c2", "board_port", "r_port_rev", Some("Governed by"), EdgeStyle::Plain),
            connection("c3", "r_port_rev", "board_team", Some("Decomposes to"), EdgeStyle::Plain),
            connection("c4", "board_team", "r_standup", Some("Processes"), EdgeStyle::Plain),
            connection("c5", "r_standup", "r_demo", Some("Progresses to"), EdgeStyle::Emphasized),
            connection("c6", "w3", "board_port", None, EdgeStyle::Plain),
            connection("c7", "w4", "board_team", None, EdgeStyle::Plain),
        ],
    }
}
