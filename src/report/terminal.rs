use crate::analyzer::seller_analysis::discount_totals_by_seller;
use crate::model::Statistics;
use crate::pipeline::QueryView;
use crate::report::{bar_cells, ReportOptions, NO_RESULTS_MESSAGE, PROMPT_MESSAGE};
use crate::utils::{format_currency, truncate};

const BAR_WIDTH: usize = 30;
const NAME_WIDTH: usize = 40;

pub fn render(view: &QueryView, opts: &ReportOptions) -> String {
    match view {
        QueryView::Prompt => format!("{}\n", PROMPT_MESSAGE),
        QueryView::Failed { message, .. } => format!("❌ {}\n", message),
        QueryView::NoResults { .. } => format!("{}\n", NO_RESULTS_MESSAGE),
        QueryView::Dashboard { query, stats } => render_dashboard(query, stats, opts),
    }
}

fn render_dashboard(query: &str, stats: &Statistics, opts: &ReportOptions) -> String {
    let money = |v: f64| format_currency(v, &opts.currency_symbol);
    let mut out = String::new();

    out.push_str(&format!("📊 Data related to \"{}\" ({})\n", query, opts.timestamp()));
    out.push_str(&format!("{}\n", "=".repeat(72)));

    out.push_str("\n💰 Values\n");
    out.push_str(&format!("  Mean price:    {}\n", money(stats.mean_price)));
    out.push_str(&format!(
        "  Highest price: {}  {}\n                 {}\n",
        money(stats.most_expensive.price),
        truncate(&stats.most_expensive.name, NAME_WIDTH),
        stats.most_expensive.thumbnail_url
    ));
    out.push_str(&format!(
        "  Lowest price:  {}  {}\n                 {}\n",
        money(stats.least_expensive.price),
        truncate(&stats.least_expensive.name, NAME_WIDTH),
        stats.least_expensive.thumbnail_url
    ));

    out.push_str("\n📦 Listings\n");
    out.push_str(&format!(
        "  {:>3}  {:<w$}  {:<20}  {:>14}  {:>6}  {:>6}  {}\n",
        "#", "Name", "Seller", "Price", "Disc %", "Qty", "Link",
        w = NAME_WIDTH
    ));
    for (i, listing) in stats.listings.iter().enumerate() {
        let r = &listing.record;
        out.push_str(&format!(
            "  {:>3}  {:<w$}  {:<20}  {:>14}  {:>5}%  {:>6}  {}\n",
            i + 1,
            truncate(&r.name, NAME_WIDTH),
            truncate(&r.seller_name, 20),
            money(r.price),
            listing.discount_pct,
            r.available_quantity,
            r.permalink,
            w = NAME_WIDTH
        ));
    }
    out.push_str(&format!("  (quantity scale max: {})\n", stats.max_available_quantity));

    out.push_str("\n🏪 Products / Sellers\n");
    out.push_str(&format!("  Listings shown: {}\n", stats.total_listings()));
    out.push_str(&format!("  Sellers:        {}\n", stats.seller_count()));
    out.push_str(&format!("  Mean per seller: {:.2}\n", stats.mean_listings_per_seller));
    out.push_str(&format!(
        "  Most listed seller:  {} | {} products | {:+}%\n",
        stats.top_seller.seller_name, stats.top_seller.count, stats.top_seller.deviation_pct
    ));
    out.push_str(&format!(
        "  Least listed seller: {} | {} products | {:+}%\n",
        stats.bottom_seller.seller_name, stats.bottom_seller.count, stats.bottom_seller.deviation_pct
    ));

    out.push_str("\nListings per seller\n");
    let max_count = stats.top_seller.count as f64;
    for share in &stats.seller_tally.shares {
        let cells = bar_cells(share.count as f64, max_count, BAR_WIDTH);
        out.push_str(&format!(
            "  {:<20} {:<bw$} {:>3} ({:.2}%)\n",
            truncate(&share.seller_name, 20),
            "█".repeat(cells),
            share.count,
            share.percentage,
            bw = BAR_WIDTH
        ));
    }

    let totals = discount_totals_by_seller(&stats.discounts);
    if !totals.is_empty() {
        out.push_str("\nDiscount per seller\n");
        let max_discount = totals.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        for (seller, amount) in &totals {
            let cells = bar_cells(*amount, max_discount, BAR_WIDTH);
            out.push_str(&format!(
                "  {:<20} {:<bw$} {}\n",
                truncate(seller, 20),
                "█".repeat(cells),
                money(*amount),
                bw = BAR_WIDTH
            ));
        }
    }

    out
}
