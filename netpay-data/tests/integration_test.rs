//! End-to-end scenarios over the shipped defaults: loader, schedules,
//! policies and the full evaluation pipeline together.

use netpay_core::{
    BracketSchedule, CompensationInput, Jurisdiction, OverlayOutcome, OverlayRequest,
    OverlaySkipReason, ScenarioInput, evaluate,
};
use netpay_data::{
    BracketTableLoader, default_bracket_rows, default_fx_rate, default_overlay_config,
    default_policy, default_schedule,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cash_only(base: Decimal) -> CompensationInput {
    CompensationInput {
        base,
        variable_pct: dec!(0),
        multi_year_cash: dec!(0),
        sign_on: dec!(0),
        rsu_year1: dec!(0),
    }
}

fn scenario<'a>(
    jurisdiction: Jurisdiction,
    compensation: CompensationInput,
    policy: &'a netpay_core::TaxPolicy,
    schedule: &'a BracketSchedule,
) -> ScenarioInput<'a> {
    ScenarioInput {
        jurisdiction,
        compensation,
        fx_rate: default_fx_rate(jurisdiction),
        policy,
        local_schedule: schedule,
        overlay: None,
    }
}

#[test]
fn singapore_100k_matches_the_published_schedule() {
    let policy = default_policy(Jurisdiction::Singapore);
    let schedule = default_schedule(Jurisdiction::Singapore);

    let result = evaluate(&scenario(
        Jurisdiction::Singapore,
        cash_only(dec!(100000)),
        &policy,
        &schedule,
    ));

    // 0 + 200 + 350 + 2,800 + 2,300
    assert_eq!(result.local.tax, dec!(5650.00));
    assert_eq!(result.local.net, dec!(94350.00));
    assert_eq!(result.local.slabs.len(), 5);
}

#[test]
fn japan_10m_walks_five_slabs() {
    let policy = default_policy(Jurisdiction::Japan);
    let schedule = default_schedule(Jurisdiction::Japan);

    let result = evaluate(&scenario(
        Jurisdiction::Japan,
        cash_only(dec!(10000000)),
        &policy,
        &schedule,
    ));

    // 97,500 + 135,000 + 730,000 + 471,500 + 330,000
    assert_eq!(result.local.tax, dec!(1764000.00));
    assert_eq!(result.local.net, dec!(8236000.00));
    assert_eq!(result.local.slabs.len(), 5);
}

#[test]
fn korea_flat_policy_never_reads_the_schedule() {
    let policy = default_policy(Jurisdiction::Korea);
    let schedule = default_schedule(Jurisdiction::Korea);

    let result = evaluate(&scenario(
        Jurisdiction::Korea,
        CompensationInput {
            base: dec!(100000000),
            variable_pct: dec!(0),
            multi_year_cash: dec!(0),
            sign_on: dec!(0),
            rsu_year1: dec!(35000000),
        },
        &policy,
        &schedule,
    ));

    assert_eq!(result.local.tax, dec!(28350000.00));
    assert_eq!(result.local.net, dec!(106650000.00));
    assert_eq!(result.local.slabs, vec![]);
}

#[test]
fn taiwan_exemption_composes_with_the_default_table() {
    let policy = default_policy(Jurisdiction::Taiwan);
    let schedule = default_schedule(Jurisdiction::Taiwan);

    let result = evaluate(&scenario(
        Jurisdiction::Taiwan,
        cash_only(dec!(4000000)),
        &policy,
        &schedule,
    ));

    // Taxable 3,500,000 after the 50%-above-3M exemption:
    // 29,500 + 88,800 + 266,000 + 252,000
    assert_eq!(result.local.tax, dec!(636300.00));
    assert_eq!(result.local.net, dec!(3363700.00));
}

#[test]
fn india_6m_stacks_surcharge_and_cess() {
    let policy = default_policy(Jurisdiction::India);
    let schedule = default_schedule(Jurisdiction::India);

    let result = evaluate(&scenario(
        Jurisdiction::India,
        cash_only(dec!(6000000)),
        &policy,
        &schedule,
    ));

    // Base 1,380,000; surcharge 10% = 138,000; cess 4% = 60,720.
    let detail = result.local.surcharge.expect("surcharge detail");
    assert_eq!(detail.base_tax, dec!(1380000.00));
    assert_eq!(detail.surcharge, dec!(138000.00));
    assert_eq!(detail.cess, dec!(60720.00));
    assert_eq!(result.local.tax, dec!(1578720.00));
}

#[test]
fn us_assignment_taxes_locally_and_skips_the_overlay() {
    let policy = default_policy(Jurisdiction::UnitedStates);
    let schedule = default_schedule(Jurisdiction::UnitedStates);
    let home_schedule = default_schedule(Jurisdiction::UnitedStates);
    let mut input = scenario(
        Jurisdiction::UnitedStates,
        cash_only(dec!(200000)),
        &policy,
        &schedule,
    );
    input.overlay = Some(OverlayRequest {
        home_schedule: &home_schedule,
        config: default_overlay_config(),
    });

    let result = evaluate(&input);

    // 1,160 + 4,266 + 11,742.50 + 21,942 + 2,576
    assert_eq!(result.local.tax, dec!(41686.50));
    assert_eq!(result.local.net, dec!(158313.50));
    assert_eq!(
        result.overlay,
        OverlayOutcome::Skipped(OverlaySkipReason::HomeCountryAssignment)
    );
}

#[test]
fn korea_overlay_credits_foreign_tax_up_to_the_tentative_tax() {
    let policy = default_policy(Jurisdiction::Korea);
    let schedule = default_schedule(Jurisdiction::Korea);
    let home_schedule = default_schedule(Jurisdiction::UnitedStates);

    // 405M KRW at 1350 KRW/USD is exactly 300,000 USD earned.
    let mut input = scenario(
        Jurisdiction::Korea,
        cash_only(dec!(405000000)),
        &policy,
        &schedule,
    );
    input.overlay = Some(OverlayRequest {
        home_schedule: &home_schedule,
        config: default_overlay_config(),
    });

    let result = evaluate(&input);

    let usd = result.usd.expect("positive FX rate");
    assert_eq!(usd.earned_usd, dec!(300000));
    assert_eq!(usd.local_tax_usd, dec!(63000));

    let overlay = result.overlay.computed().expect("overlay computed");
    // Taxable 158,900: 1,160 + 4,266 + 11,742.50 + 14,010 = 31,178.50
    assert_eq!(overlay.taxable_base, dec!(158900));
    assert_eq!(overlay.tentative_tax, dec!(31178.50));
    // Credit capped at the tentative tax, not the 63,000 foreign tax paid.
    assert_eq!(overlay.credit_used, dec!(31178.50));
    assert_eq!(overlay.tax_due, dec!(0.00));
    assert_eq!(overlay.combined_tax, dec!(63000.00));
    assert_eq!(overlay.combined_net, dec!(237000.00));
}

#[test]
fn zero_fx_rate_blocks_the_overlay_with_a_reason() {
    let policy = default_policy(Jurisdiction::Korea);
    let schedule = default_schedule(Jurisdiction::Korea);
    let home_schedule = default_schedule(Jurisdiction::UnitedStates);
    let mut input = scenario(
        Jurisdiction::Korea,
        cash_only(dec!(100000000)),
        &policy,
        &schedule,
    );
    input.fx_rate = dec!(0);
    input.overlay = Some(OverlayRequest {
        home_schedule: &home_schedule,
        config: default_overlay_config(),
    });

    let result = evaluate(&input);

    assert_eq!(result.usd, None);
    assert_eq!(
        result.overlay,
        OverlayOutcome::Skipped(OverlaySkipReason::NonPositiveFxRate)
    );
    // The local layer is unaffected by the blocked conversion.
    assert_eq!(result.local.tax, dec!(21000000.00));
}

#[test]
fn user_supplied_table_replaces_the_default_schedule() {
    let csv = "jurisdiction,upper_limit,rate\n\
               SG,50000,10\n\
               SG,,20\n";
    let records = BracketTableLoader::parse(csv.as_bytes()).expect("parse CSV");
    let tables = BracketTableLoader::group(&records).expect("group records");
    let schedule = BracketSchedule::normalize(&tables[&Jurisdiction::Singapore]);

    let policy = default_policy(Jurisdiction::Singapore);
    let result = evaluate(&scenario(
        Jurisdiction::Singapore,
        cash_only(dec!(80000)),
        &policy,
        &schedule,
    ));

    // Whole-percentage rates rescaled: 50,000 × 10% + 30,000 × 20%.
    assert_eq!(result.local.tax, dec!(11000.00));
}

#[test]
fn default_rows_survive_normalization_unchanged() {
    for jurisdiction in Jurisdiction::ALL {
        let rows = default_bracket_rows(jurisdiction);
        let schedule = BracketSchedule::normalize(&rows);

        if rows.is_empty() {
            // Korea: synthesized single open 0% entry.
            assert_eq!(schedule.entries().len(), 1);
        } else {
            // Shipped tables are already sorted with one open row last.
            assert_eq!(schedule.entries().len(), rows.len());
            assert_eq!(schedule.to_raw_rows(), rows);
        }
    }
}
