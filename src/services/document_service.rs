// src/services/document_service.rs

use genpdf::{elements, style, Alignment, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OmraRepository, SalesRepository},
};

const AGENCY_NAME: &str = "ZIYARA VOYAGES";
const AGENCY_ADDRESS: &str = "12 rue Didouche Mourad, Alger — RC 16/00-123456";

#[derive(Clone)]
pub struct DocumentService {
    sales_repo: SalesRepository,
    omra_repo: OmraRepository,
}

impl DocumentService {
    pub fn new(sales_repo: SalesRepository, omra_repo: OmraRepository) -> Self {
        Self { sales_repo, omra_repo }
    }

    fn new_document(&self, title: String) -> Result<genpdf::Document, AppError> {
        // La police est chargée depuis ./fonts au démarrage du rendu
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Police absente du dossier ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        Ok(doc)
    }

    fn push_header(doc: &mut genpdf::Document) {
        doc.push(
            elements::Paragraph::new(AGENCY_NAME)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(AGENCY_ADDRESS)
                .styled(style::Style::new().with_font_size(8)),
        );
        doc.push(elements::Break::new(1.5));
    }

    // Facture d'une vente : en-tête agence, client, montants, QR code
    // portant la référence de facture.
    pub async fn generate_invoice_pdf(&self, sale_id: Uuid) -> Result<Vec<u8>, AppError> {
        let sale = self
            .sales_repo
            .find_by_id(sale_id)
            .await?
            .ok_or(AppError::NotFound("sale"))?;

        let reference = format!("ZV-FACT-{}", &sale.id.to_string()[..8]);

        let mut doc = self.new_document(format!("Facture {}", reference))?;
        Self::push_header(&mut doc);

        doc.push(
            elements::Paragraph::new(format!("FACTURE {}", reference))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Date : {}",
            sale.created_at.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!("Client : {}", sale.client_name)));
        doc.push(elements::Break::new(2));

        // Poids des colonnes : désignation (5), montant (2)
        let mut table = elements::TableLayout::new(vec![5, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Désignation").styled(style_bold))
            .element(elements::Paragraph::new("Montant").styled(style_bold))
            .push()
            .expect("Table error");

        table
            .row()
            .element(elements::Paragraph::new(format!(
                "Prestation {:?} — {}",
                sale.sale_type, sale.client_name
            )))
            .element(elements::Paragraph::new(format!("{:.2} DA", sale.selling_price)))
            .push()
            .expect("Table row error");

        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL : {:.2} DA", sale.selling_price));
        total_paragraph.set_alignment(Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        if sale.cashed_in {
            doc.push(elements::Paragraph::new("Réglée — encaissée"));
        } else {
            doc.push(elements::Paragraph::new("En attente d'encaissement"));
        }

        doc.push(elements::Break::new(2));

        // QR code de la référence, pour le rapprochement à la caisse
        let code = QrCode::new(reference.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }

    // Historique des versements d'un pèlerin : programme, tableau des
    // paiements, total versé et restant dû.
    pub async fn generate_payment_history_pdf(&self, pelerin_id: Uuid) -> Result<Vec<u8>, AppError> {
        let pelerin = self
            .omra_repo
            .find_pelerin(pelerin_id)
            .await?
            .ok_or(AppError::NotFound("pelerin"))?;

        let program = self
            .omra_repo
            .find_program(pelerin.program_id)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        let payments = self.omra_repo.list_payments(pelerin_id).await?;
        let total_paid: rust_decimal::Decimal = payments.iter().map(|p| p.amount).sum();
        let remaining = program.price - total_paid;

        let mut doc = self.new_document(format!("Versements — {}", pelerin.full_name))?;
        Self::push_header(&mut doc);

        doc.push(
            elements::Paragraph::new("HISTORIQUE DES VERSEMENTS")
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Pèlerin : {}", pelerin.full_name)));
        doc.push(elements::Paragraph::new(format!(
            "Passeport : {}",
            pelerin.passport_number
        )));
        doc.push(elements::Paragraph::new(format!("Programme : {}", program.name)));
        doc.push(elements::Paragraph::new(format!(
            "Départ : {} — Retour : {}",
            program.departure_date.format("%d/%m/%Y"),
            program.return_date.format("%d/%m/%Y")
        )));
        doc.push(elements::Break::new(2));

        // Poids des colonnes : date (2), mode (2), montant (2)
        let mut table = elements::TableLayout::new(vec![2, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Date").styled(style_bold))
            .element(elements::Paragraph::new("Mode").styled(style_bold))
            .element(elements::Paragraph::new("Montant").styled(style_bold))
            .push()
            .expect("Table error");

        for payment in &payments {
            table
                .row()
                .element(elements::Paragraph::new(
                    payment.paid_at.format("%d/%m/%Y").to_string(),
                ))
                .element(elements::Paragraph::new(format!("{:?}", payment.method)))
                .element(elements::Paragraph::new(format!("{:.2} DA", payment.amount)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        doc.push(
            elements::Paragraph::new(format!("Prix du programme : {:.2} DA", program.price))
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(
            elements::Paragraph::new(format!("Total versé : {:.2} DA", total_paid))
                .styled(style::Style::new().bold()),
        );

        let mut remaining_paragraph =
            elements::Paragraph::new(format!("RESTANT DÛ : {:.2} DA", remaining));
        remaining_paragraph.set_alignment(Alignment::Right);
        doc.push(remaining_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
